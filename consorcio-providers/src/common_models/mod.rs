pub mod claim;
pub mod expense;
pub mod file;
pub mod macros;
pub mod organisation;
pub mod payment;
pub mod profile;
pub mod session;

#[cfg(test)]
mod test;
