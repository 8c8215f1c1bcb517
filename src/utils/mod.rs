pub mod datastruct;
