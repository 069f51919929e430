use std::fmt::{self, Display, Formatter};

/// One of the three serving locations run by the canteen operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Canteen {
    Harcov,
    Husova,
    Voronezska,
}

impl Canteen {
    pub const ALL: [Self; 3] = [Self::Harcov, Self::Husova, Self::Voronezska];

    /// Numeric id used in menu prompts and in order forms.
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Harcov => 1,
            Self::Husova => 2,
            Self::Voronezska => 3,
        }
    }

    /// Path segment of the canteen on the ordering site.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Harcov => "harcov",
            Self::Husova => "husova",
            Self::Voronezska => "voronezska",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Harcov => "Harcov",
            Self::Husova => "Husova",
            Self::Voronezska => "Voroněžská",
        }
    }

    #[must_use]
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

impl Display for Canteen {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for canteen in Canteen::ALL {
            assert_eq!(Canteen::from_id(canteen.id()), Some(canteen));
        }
        assert_eq!(Canteen::from_id(0), None);
        assert_eq!(Canteen::from_id(4), None);
    }

    #[test]
    fn test_slugs() {
        assert_eq!(Canteen::Harcov.slug(), "harcov");
        assert_eq!(Canteen::Husova.slug(), "husova");
        assert_eq!(Canteen::Voronezska.slug(), "voronezska");
    }
}
