pub mod validate;

pub const ID_LIST_SEPARATOR: char = ',';

pub fn split_ids(ids: &str) -> Vec<&str> {
    ids.split(ID_LIST_SEPARATOR)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect()
}
