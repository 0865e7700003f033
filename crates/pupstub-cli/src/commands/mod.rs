pub mod launch;
pub mod serve;
