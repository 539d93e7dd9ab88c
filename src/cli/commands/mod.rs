pub mod bootstrap;
pub mod check;
pub mod extract;
pub mod schema;
