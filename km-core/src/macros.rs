pub use std::collections::BTreeMap;

// Generate a string map for a k8s object (labels, annotations, or ConfigMap data), using
// kmap!("key1" => value1, "key2" => value2) syntax
#[macro_export]
macro_rules! kmap {
    ($($key:expr => $val:expr),+$(,)?) => {
        Some(BTreeMap::from([$(($key.to_string(), $val.to_string())),+]))
    };
}

pub use kmap;
