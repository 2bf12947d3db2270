// menu.rs

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MenuChoice {
    BasicCalculation,
    AdvancedCalculation,
    ShowHistory,
    ClearHistory,
    Exit,
    Invalid,
}

impl MenuChoice {
    /// Exact match only; surrounding whitespace makes a choice invalid.
    pub fn parse(line: &str) -> Self {
        match line {
            "1" => MenuChoice::BasicCalculation,
            "2" => MenuChoice::AdvancedCalculation,
            "3" => MenuChoice::ShowHistory,
            "4" => MenuChoice::ClearHistory,
            "5" => MenuChoice::Exit,
            _ => MenuChoice::Invalid,
        }
    }
}

/// Where the loop goes once an action has finished.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Step {
    Menu,
    /// The user picked Exit.
    Exit,
    /// Input was closed; leave without waiting for more.
    Closed,
}
