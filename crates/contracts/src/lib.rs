//! Data types shared by the PetPooja sales import.

pub mod domain;
pub mod usecases;
