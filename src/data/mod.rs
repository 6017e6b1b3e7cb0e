pub mod plants;
