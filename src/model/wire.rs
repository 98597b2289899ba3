//! Serde helpers for lists whose items are wrapped in a single-key object,
//! e.g. `[{ "measure": {...} }, { "measure": {...} }]`.

macro_rules! wrapped_list {
    ($module:ident, $key:tt, $item:ty) => {
        pub(crate) mod $module {
            use serde::{Deserialize, Deserializer, Serialize, Serializer};

            #[derive(Serialize, Deserialize)]
            struct Wrapped<T> {
                #[serde(rename = $key)]
                inner: T,
            }

            pub fn serialize<S: Serializer>(items: &[$item], serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_seq(items.iter().map(|inner| Wrapped { inner }))
            }

            pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<$item>, D::Error> {
                let wrapped: Vec<Wrapped<$item>> = Vec::deserialize(deserializer)?;
                Ok(wrapped.into_iter().map(|w| w.inner).collect())
            }
        }
    };
}

wrapped_list!(measures, "measure", crate::model::Measure);
wrapped_list!(categories, "category", crate::model::Category);
wrapped_list!(attribute_filters, "listAttributeFilter", crate::model::AttributeFilter);
