use super::{Error, contact::Contact};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The single active filter of the contact list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterSelector {
    #[default]
    None,
    Favorite,
    Blocked,
}

impl FilterSelector {
    pub fn matches(&self, contact: &Contact) -> bool {
        match self {
            FilterSelector::None => true,
            FilterSelector::Favorite => contact.is_favorite,
            FilterSelector::Blocked => contact.is_blocked,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterSelector::None => "none",
            FilterSelector::Favorite => "favorite",
            FilterSelector::Blocked => "blocked",
        }
    }
}

impl fmt::Display for FilterSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterSelector {
    type Err = Error;

    // the empty string is the "--select filter--" option of the list page
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(FilterSelector::None),
            "favorite" => Ok(FilterSelector::Favorite),
            "blocked" => Ok(FilterSelector::Blocked),
            other => Err(Error::UnknownSelector(other.to_owned())),
        }
    }
}

/// Returns the contacts matching the selector, keeping their order
pub fn visible(contacts: &[Contact], selector: FilterSelector) -> Vec<Contact> {
    contacts
        .iter()
        .filter(|c| selector.matches(c))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::contact;

    fn contacts() -> Vec<Contact> {
        vec![
            contact("1", "Ann", true, false),
            contact("2", "Bob", false, true),
            contact("3", "Cid", true, true),
            contact("4", "Dee", false, false),
            contact("5", "Eve", true, false),
        ]
    }

    fn ids(contacts: &[Contact]) -> Vec<&str> {
        contacts.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn none_returns_everything_in_order() {
        let all = contacts();
        assert_eq!(visible(&all, FilterSelector::None), all);
    }

    #[test]
    fn favorite_keeps_source_order() {
        let all = contacts();
        let res = visible(&all, FilterSelector::Favorite);
        assert_eq!(ids(&res), vec!["1", "3", "5"]);
        assert!(res.iter().all(|c| c.is_favorite));
    }

    #[test]
    fn blocked_keeps_source_order() {
        let all = contacts();
        let res = visible(&all, FilterSelector::Blocked);
        assert_eq!(ids(&res), vec!["2", "3"]);
    }

    #[test]
    fn flags_are_independent() {
        let all = vec![contact("9", "Flo", false, false)];
        assert!(visible(&all, FilterSelector::Favorite).is_empty());
        assert!(visible(&all, FilterSelector::Blocked).is_empty());
        assert_eq!(visible(&all, FilterSelector::None).len(), 1);
    }

    #[test]
    fn empty_collection() {
        assert!(visible(&[], FilterSelector::Favorite).is_empty());
        assert!(visible(&[], FilterSelector::None).is_empty());
    }

    #[test]
    fn parse_selector() {
        assert_eq!("".parse::<FilterSelector>(), Ok(FilterSelector::None));
        assert_eq!("none".parse::<FilterSelector>(), Ok(FilterSelector::None));
        assert_eq!(
            "favorite".parse::<FilterSelector>(),
            Ok(FilterSelector::Favorite)
        );
        assert_eq!(
            " blocked ".parse::<FilterSelector>(),
            Ok(FilterSelector::Blocked)
        );
        assert_eq!(
            "starred".parse::<FilterSelector>(),
            Err(Error::UnknownSelector("starred".to_string()))
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for selector in [
            FilterSelector::None,
            FilterSelector::Favorite,
            FilterSelector::Blocked,
        ] {
            assert_eq!(selector.to_string().parse::<FilterSelector>(), Ok(selector));
        }
    }
}
