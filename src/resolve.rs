use crate::index::CountryIndex;
use crate::models::CountryProfile;

/// Outcome of looking up one country.
///
/// A `Found` profile may still lack a boundary (`profile.geometry()` is
/// `None`); that is a different situation from `NotFound`, where there are no
/// statistics to show at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    Found(CountryProfile<'a>),
    NotFound,
}

impl<'a> Resolution<'a> {
    pub fn profile(self) -> Option<CountryProfile<'a>> {
        match self {
            Resolution::Found(p) => Some(p),
            Resolution::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }
}

/// Resolves country names against a built index. Has no state of its own.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'i, 'a> {
    index: &'i CountryIndex<'a>,
}

impl<'i, 'a> Resolver<'i, 'a> {
    pub fn new(index: &'i CountryIndex<'a>) -> Self {
        Self { index }
    }

    pub fn resolve(&self, name: &str) -> Resolution<'a> {
        match self.index.stats(name) {
            Some(stats) => {
                let geometry = self.index.geometry(name);
                if geometry.is_none() {
                    log::debug!("{:?} has statistics but no boundary", name);
                }
                Resolution::Found(CountryProfile::new(stats, geometry))
            }
            None => Resolution::NotFound,
        }
    }
}
