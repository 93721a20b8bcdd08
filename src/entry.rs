/// A key-value pair stored in a tree node. The key is never handed out mutably once the entry
/// is linked into a tree.
#[derive(Clone, Debug)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }

    pub fn as_pair(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    pub fn as_pair_mut(&mut self) -> (&K, &mut V) {
        (&self.key, &mut self.value)
    }
}
