pub(crate) mod actions;
pub(crate) mod notify;
pub(crate) mod rebuild;
pub(crate) mod search;
pub(crate) mod tiles;
pub(crate) mod types;

#[cfg(test)]
pub(crate) mod testing;
