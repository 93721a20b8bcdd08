use rbtree_collections::red_black_tree::RedBlackTree;
use std::cell::Cell;
use std::rc::Rc;

const NUM_OF_KEYS: u32 = 1 << 12;

// A red black tree with n nodes is at most 2 * log2(n + 1) levels deep.
const MAX_DEPTH: usize = 2 * 13;

fn counting_tree() -> (
    RedBlackTree<u32, u32, impl Fn(&u32, &u32) -> bool>,
    Rc<Cell<usize>>,
) {
    let count = Rc::new(Cell::new(0));
    let counter = Rc::clone(&count);
    let mut tree = RedBlackTree::with_comparator(move |lhs: &u32, rhs: &u32| {
        counter.set(counter.get() + 1);
        lhs < rhs
    });
    for key in 0..NUM_OF_KEYS {
        tree.insert(key * 2, key);
    }
    (tree, count)
}

#[test]
fn test_bounds_use_one_comparison_per_level() {
    let (tree, count) = counting_tree();
    for key in 0..NUM_OF_KEYS * 2 + 1 {
        count.set(0);
        let expected = if key <= (NUM_OF_KEYS - 1) * 2 {
            Some((key + 1) / 2 * 2)
        } else {
            None
        };
        assert_eq!(tree.lower_bound(&key).key().cloned(), expected);
        assert!(count.get() <= MAX_DEPTH);

        count.set(0);
        tree.upper_bound(&key);
        assert!(count.get() <= MAX_DEPTH);
    }
}

#[test]
fn test_find_uses_at_most_two_comparisons_per_level() {
    let (tree, count) = counting_tree();
    for key in 0..NUM_OF_KEYS * 2 {
        count.set(0);
        assert_eq!(tree.find(&key).is_end(), key % 2 == 1);
        assert!(count.get() <= 2 * MAX_DEPTH);
    }
}

#[test]
fn test_insert_uses_logarithmic_comparisons() {
    let (mut tree, count) = counting_tree();
    for key in 0..NUM_OF_KEYS {
        count.set(0);
        assert!(tree.insert(key * 2 + 1, key).1);
        assert!(count.get() <= 2 * (MAX_DEPTH + 1));
    }
    tree.validate().unwrap();
}
