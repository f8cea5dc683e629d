pub mod db;
pub mod errors;
pub mod species;
pub mod treatment;

#[cfg(test)]
mod tests;
