pub mod cover_source;
pub mod metadata_store;
pub mod object_store;

#[cfg(test)]
pub mod fakes;
