pub mod channels;
pub mod members;
pub mod profiles;
pub mod servers;
