//! Closed set of interactive menu commands.
//!
//! Every command maps to exactly one tree operation. Menu numbers are only
//! ever converted through [`MenuChoice::from_number`] and [`MenuChoice::number`].

use std::fmt;
use std::str::FromStr;

use crate::application::error::ApplicationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuChoice {
    AddChild,
    Display,
    FindSiblings,
    ListLeaves,
    ListInternalNodes,
    ListEdges,
    FindDepth,
    FindHeight,
    FindSubtree,
    Exit,
    FindPath,
    FindParent,
    ResetRoot,
}

impl MenuChoice {
    /// All choices in menu order.
    pub const ALL: [MenuChoice; 13] = [
        MenuChoice::AddChild,
        MenuChoice::Display,
        MenuChoice::FindSiblings,
        MenuChoice::ListLeaves,
        MenuChoice::ListInternalNodes,
        MenuChoice::ListEdges,
        MenuChoice::FindDepth,
        MenuChoice::FindHeight,
        MenuChoice::FindSubtree,
        MenuChoice::Exit,
        MenuChoice::FindPath,
        MenuChoice::FindParent,
        MenuChoice::ResetRoot,
    ];

    pub fn number(self) -> u32 {
        match self {
            MenuChoice::AddChild => 1,
            MenuChoice::Display => 2,
            MenuChoice::FindSiblings => 3,
            MenuChoice::ListLeaves => 4,
            MenuChoice::ListInternalNodes => 5,
            MenuChoice::ListEdges => 6,
            MenuChoice::FindDepth => 7,
            MenuChoice::FindHeight => 8,
            MenuChoice::FindSubtree => 9,
            MenuChoice::Exit => 10,
            MenuChoice::FindPath => 11,
            MenuChoice::FindParent => 12,
            MenuChoice::ResetRoot => 13,
        }
    }

    pub fn from_number(number: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|choice| choice.number() == number)
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::AddChild => "Add child node",
            MenuChoice::Display => "Display tree",
            MenuChoice::FindSiblings => "Find siblings of a node",
            MenuChoice::ListLeaves => "List leaves of the tree",
            MenuChoice::ListInternalNodes => "List internal nodes of the tree",
            MenuChoice::ListEdges => "List edges of the tree",
            MenuChoice::FindDepth => "Find depth of a node",
            MenuChoice::FindHeight => "Find height of the tree",
            MenuChoice::FindSubtree => "Find subtree rooted at a given node",
            MenuChoice::Exit => "Exit",
            MenuChoice::FindPath => "Find path from the root to a node",
            MenuChoice::FindParent => "Find parent of a node",
            MenuChoice::ResetRoot => "Reset the tree to a new root",
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

impl FromStr for MenuChoice {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(Self::from_number)
            .ok_or_else(|| ApplicationError::InvalidChoice(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", MenuChoice::AddChild)]
    #[case("2", MenuChoice::Display)]
    #[case("9", MenuChoice::FindSubtree)]
    #[case("10", MenuChoice::Exit)]
    #[case(" 13 ", MenuChoice::ResetRoot)]
    fn given_menu_number_when_parsed_then_maps_to_choice(
        #[case] input: &str,
        #[case] expected: MenuChoice,
    ) {
        assert_eq!(input.parse::<MenuChoice>().unwrap(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("14")]
    #[case("-1")]
    #[case("two")]
    #[case("")]
    fn given_unknown_input_when_parsed_then_invalid_choice(#[case] input: &str) {
        assert!(matches!(
            input.parse::<MenuChoice>(),
            Err(ApplicationError::InvalidChoice(_))
        ));
    }

    #[test]
    fn given_all_choices_then_numbers_are_unique_and_round_trip() {
        for (position, choice) in MenuChoice::ALL.iter().enumerate() {
            assert_eq!(choice.number() as usize, position + 1);
            assert_eq!(MenuChoice::from_number(choice.number()), Some(*choice));
        }
    }

    #[test]
    fn given_choice_when_displayed_then_shows_number_and_label() {
        assert_eq!(MenuChoice::Exit.to_string(), "10. Exit");
    }
}
