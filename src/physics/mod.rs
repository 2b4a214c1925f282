pub mod vector;
pub mod gravity;
pub mod aerodynamics;
pub mod atmosphere;
pub mod propulsion;
pub mod attitude;
