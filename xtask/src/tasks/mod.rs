pub mod bundle;
pub mod check;
pub mod compiler;
pub mod doctor;
pub mod publish;
pub mod runtime;
