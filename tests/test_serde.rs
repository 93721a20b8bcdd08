use rbtree_collections::compare::ReverseOrder;
use rbtree_collections::red_black_tree::{RedBlackMap, RedBlackSet};
use serde_test::{assert_de_tokens, assert_tokens, Token};

#[test]
fn test_map_tokens() {
    let map: RedBlackMap<u32, char> = vec![(2, 'b'), (1, 'a')].into_iter().collect();
    assert_tokens(
        &map,
        &[
            Token::Map { len: Some(2) },
            Token::U32(1),
            Token::Char('a'),
            Token::U32(2),
            Token::Char('b'),
            Token::MapEnd,
        ],
    );
}

#[test]
fn test_map_duplicate_keys_keep_first() {
    let map: RedBlackMap<u32, u32> = vec![(1, 10)].into_iter().collect();
    assert_de_tokens(
        &map,
        &[
            Token::Map { len: Some(2) },
            Token::U32(1),
            Token::U32(10),
            Token::U32(1),
            Token::U32(20),
            Token::MapEnd,
        ],
    );
}

#[test]
fn test_set_tokens() {
    let set: RedBlackSet<u32> = vec![3, 1, 2].into_iter().collect();
    assert_tokens(
        &set,
        &[
            Token::Seq { len: Some(3) },
            Token::U32(1),
            Token::U32(2),
            Token::U32(3),
            Token::SeqEnd,
        ],
    );
}

#[test]
fn test_map_bincode() {
    let map: RedBlackMap<u32, String> = (0..100).map(|key| (key, key.to_string())).collect();
    let bytes = bincode::serialize(&map).unwrap();
    let decoded: RedBlackMap<u32, String> = bincode::deserialize(&bytes).unwrap();
    assert_eq!(map, decoded);
    decoded.validate().unwrap();
}

#[test]
fn test_set_bincode_with_comparator() {
    let set: RedBlackSet<u32, ReverseOrder> = (0..100).collect();
    let bytes = bincode::serialize(&set).unwrap();
    let decoded: RedBlackSet<u32, ReverseOrder> = bincode::deserialize(&bytes).unwrap();
    assert_eq!(decoded.first(), Some(&99));
    assert_eq!(set, decoded);
    decoded.validate().unwrap();
}
