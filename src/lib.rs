#[macro_use]
extern crate nom;
extern crate quickcheck;
#[cfg(test)]
extern crate rand;

pub mod scales;
