pub mod comparison_context;
