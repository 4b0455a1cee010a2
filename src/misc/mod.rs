pub mod date_math;
