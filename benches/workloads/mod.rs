pub mod micro;
