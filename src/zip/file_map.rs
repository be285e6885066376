use std::collections::HashMap;

/// Ordered mapping from archive path to file content.
///
/// Iteration follows first-insertion order, which is the order entries are
/// written to the archive. Re-inserting a name replaces its content in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMap {
    files: Vec<(String, Vec<u8>)>,
    index: HashMap<String, usize>,
}

impl FileMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a file, returning the previous content if any.
    pub fn insert(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> Option<Vec<u8>> {
        let name = name.into();
        let data = data.into();
        match self.index.get(&name) {
            Some(&slot) => Some(std::mem::replace(&mut self.files[slot].1, data)),
            None => {
                self.index.insert(name.clone(), self.files.len());
                self.files.push((name, data));
                None
            }
        }
    }

    /// Remove a file; later files keep their relative order.
    pub fn remove(&mut self, name: &str) -> Option<Vec<u8>> {
        let slot = self.index.remove(name)?;
        let (_, data) = self.files.remove(slot);
        for (name, _) in &self.files[slot..] {
            if let Some(i) = self.index.get_mut(name) {
                *i -= 1;
            }
        }
        Some(data)
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.index
            .get(name)
            .map(|&slot| self.files[slot].1.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Names in archive order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.files
            .iter()
            .map(|(name, data)| (name.as_str(), data.as_slice()))
    }

    /// Sum of all content lengths.
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|(_, data)| data.len() as u64).sum()
    }
}

impl<'a> IntoIterator for &'a FileMap {
    type Item = (&'a str, &'a [u8]);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a [u8])> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl<N: Into<String>, D: Into<Vec<u8>>> FromIterator<(N, D)> for FileMap {
    fn from_iter<I: IntoIterator<Item = (N, D)>>(iter: I) -> Self {
        let mut map = FileMap::new();
        for (name, data) in iter {
            map.insert(name, data);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let map: FileMap = [("b.jpg", vec![2]), ("a.jpg", vec![1]), ("c.jpg", vec![3])]
            .into_iter()
            .collect();
        assert_eq!(map.names().collect::<Vec<_>>(), ["b.jpg", "a.jpg", "c.jpg"]);
        assert_eq!(map.total_size(), 3);
    }

    #[test]
    fn replace_keeps_first_position() {
        let mut map = FileMap::new();
        assert_eq!(map.insert("x", b"old".to_vec()), None);
        map.insert("y", b"y".to_vec());
        assert_eq!(map.insert("x", b"new".to_vec()), Some(b"old".to_vec()));

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("x"), Some(&b"new"[..]));
        let order: Vec<_> = map.iter().collect();
        assert_eq!(order, vec![("x", &b"new"[..]), ("y", &b"y"[..])]);
    }

    #[test]
    fn lookups() {
        let mut map = FileMap::new();
        assert!(map.is_empty());
        map.insert("empty.bin", Vec::new());
        assert!(map.contains("empty.bin"));
        assert!(!map.contains("other"));
        assert_eq!(map.get("empty.bin"), Some(&[][..]));
    }

    #[test]
    fn remove_keeps_order_of_the_rest() {
        let mut map: FileMap = [("a", vec![1]), ("b", vec![2]), ("c", vec![3])]
            .into_iter()
            .collect();
        assert_eq!(map.remove("a"), Some(vec![1]));
        assert_eq!(map.remove("a"), None);
        assert_eq!(map.names().collect::<Vec<_>>(), ["b", "c"]);
        assert_eq!(map.get("c"), Some(&[3u8][..]));

        map.insert("a", vec![4]);
        map.insert("c", vec![5]);
        assert_eq!(map.names().collect::<Vec<_>>(), ["b", "c", "a"]);
        assert_eq!(map.get("c"), Some(&[5u8][..]));
        assert!(!map.contains("d"));
    }
}
