//! 有序记录集合
//!
//! 剧本里的角色、场景、地点以 `id -> 记录` 的 JSON 对象形式保存，
//! 导出和列表展示都依赖插入顺序，因此这里用显式的有序序列保存，
//! 不依赖任何 map 容器的迭代顺序。

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// 按插入顺序保存的 `id -> 记录` 集合
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == id)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|(key, _)| key == id)
            .map(|(_, value)| value)
    }

    /// 插入记录；id 已存在时原位替换，不改变顺序
    pub fn insert(&mut self, id: impl Into<String>, value: T) {
        let id = id.into();
        match self.get_mut(&id) {
            Some(slot) => *slot = value,
            None => self.entries.push((id, value)),
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        let pos = self.entries.iter().position(|(key, _)| key == id)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// 下一个可用的顺序 id（`len + 1`，若被占用则继续递增）
    pub fn next_id(&self) -> String {
        let mut n = self.entries.len() + 1;
        while self.contains(&n.to_string()) {
            n += 1;
        }
        n.to_string()
    }
}

impl<T> Collection<T> {
    /// 丢弃 id，按插入顺序取出所有记录
    pub fn into_vec(self) -> Vec<T> {
        self.entries.into_iter().map(|(_, value)| value).collect()
    }
}

impl<T: Clone> Collection<T> {
    /// 按插入顺序复制出所有记录
    pub fn to_vec(&self) -> Vec<T> {
        self.values().cloned().collect()
    }
}

impl<T> FromIterator<(String, T)> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        let mut collection = Collection::new();
        for (id, value) in iter {
            collection.insert(id, value);
        }
        collection
    }
}

impl<T: Serialize> Serialize for Collection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, value) in &self.entries {
            map.serialize_entry(id, value)?;
        }
        map.end()
    }
}

struct CollectionVisitor<T> {
    marker: PhantomData<T>,
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for CollectionVisitor<T> {
    type Value = Collection<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object of id -> record")
    }

    /// null 视为空集合
    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(Collection::new())
    }

    /// 数组形式按位置编号，从 "1" 开始
    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut collection = Collection::new();
        while let Some(value) = access.next_element::<T>()? {
            collection.insert((collection.len() + 1).to_string(), value);
        }
        Ok(collection)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut collection = Collection::new();
        while let Some((id, value)) = access.next_entry::<String, T>()? {
            collection.insert(id, value);
        }
        Ok(collection)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Collection<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CollectionVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_json_key_order() {
        let json = r#"{"3": "c", "1": "a", "2": "b"}"#;
        let collection: Collection<String> = serde_json::from_str(json).unwrap();
        let ids: Vec<&str> = collection.ids().collect();
        assert_eq!(ids, vec!["3", "1", "2"]);

        let back = serde_json::to_string(&collection).unwrap();
        assert_eq!(back, r#"{"3":"c","1":"a","2":"b"}"#);
    }

    #[test]
    fn null_and_array_shapes_are_accepted() {
        let empty: Collection<String> = serde_json::from_str("null").unwrap();
        assert!(empty.is_empty());

        let listed: Collection<String> = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        let ids: Vec<&str> = listed.ids().collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(listed.get("2").map(String::as_str), Some("b"));
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut collection = Collection::new();
        collection.insert("1", 10);
        collection.insert("2", 20);
        collection.insert("1", 11);
        assert_eq!(collection.to_vec(), vec![11, 20]);
    }

    #[test]
    fn next_id_skips_taken_ids() {
        let mut collection = Collection::new();
        collection.insert("1", ());
        collection.insert("3", ());
        // len + 1 = 3 已被占用
        assert_eq!(collection.next_id(), "4");
        collection.remove("1");
        assert_eq!(collection.next_id(), "2");
    }
}
