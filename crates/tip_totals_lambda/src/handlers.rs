pub mod calculate_tips;
