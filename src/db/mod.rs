pub mod bootstrap;
pub mod check;
pub mod runtime;
pub mod schema;

pub use bootstrap::{bootstrap, BootstrapOptions, BootstrapReport};
pub use check::{check, CheckReport};
pub use runtime::{ContainerRuntime, DockerComposeRuntime};
