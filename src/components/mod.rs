pub mod question_details;
pub mod question_graph;
pub mod user_switcher;
