pub mod data_table;
pub mod filter_dropdown;
pub mod form_modal;
pub mod layout;
pub mod toast_stack;
pub mod top_search_bar;
