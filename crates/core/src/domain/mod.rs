pub mod estimate;
pub mod faq;
pub mod lead;
