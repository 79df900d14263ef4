pub mod assignment_card;
pub mod candidate_list;
pub mod filter_panel;
