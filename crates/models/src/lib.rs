pub mod db;
pub mod credential;
pub mod server;

#[cfg(test)]
mod tests;
