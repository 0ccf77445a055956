pub mod force_graph;
pub mod question_panel;
pub mod score_hud;
pub mod star_field;
