mod practice;

pub use practice::PracticeView;
