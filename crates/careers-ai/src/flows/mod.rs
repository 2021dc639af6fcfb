//! One module per AI capability. Each flow renders its prompt, makes a
//! single call, and checks the reply before handing it back.

pub mod blogs;
pub mod job;
pub mod resume;
