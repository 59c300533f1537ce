pub mod project;
pub mod task;
pub mod user;

/// Deserializer that tells "field absent" apart from "field: null".
///
/// Plain `Option<T>` collapses both to `None`; wrapping the field as
/// `Option<Option<T>>` with this function yields `None` for absent and
/// `Some(None)` for an explicit null, which is what partial updates need
/// to clear nullable columns.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}
