use std::fmt;

/// The hues offered at the first prompt, in prompt order
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub(crate) enum Hue {
    Green,
    Red,
    Yellow,
    Purple,
    Blue,
    Orange,
}

impl Hue {
    pub(crate) const ALL: [Hue; 6] = [
        Hue::Green,
        Hue::Red,
        Hue::Yellow,
        Hue::Purple,
        Hue::Blue,
        Hue::Orange,
    ];

    /// Name shown to the operator.  The installer speaks English only; these
    /// stand in for the package's Spanish palette keys (verde, rojo,
    /// amarillo, morado, azul, naranja) in the same order.
    pub(crate) fn name(self) -> &'static str {
        match self {
            Hue::Green => "green",
            Hue::Red => "red",
            Hue::Yellow => "yellow",
            Hue::Purple => "purple",
            Hue::Blue => "blue",
            Hue::Orange => "orange",
        }
    }

    /// Parse a 1-based menu answer
    pub(crate) fn from_choice(answer: &str) -> Option<Hue> {
        choose(&Hue::ALL, answer)
    }

    fn index0(self) -> usize {
        match self {
            Hue::Green => 0,
            Hue::Red => 1,
            Hue::Yellow => 2,
            Hue::Purple => 3,
            Hue::Blue => 4,
            Hue::Orange => 5,
        }
    }
}

impl fmt::Display for Hue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub(crate) enum Shade {
    Light,
    Medium,
    Dark,
}

impl Shade {
    pub(crate) const ALL: [Shade; 3] = [Shade::Light, Shade::Medium, Shade::Dark];

    /// Name shown in the confirmation message.  Stands in for the package's
    /// claro/medio/oscuro shade keys.
    pub(crate) fn name(self) -> &'static str {
        match self {
            Shade::Light => "light",
            Shade::Medium => "medium",
            Shade::Dark => "dark",
        }
    }

    /// Name as shown in the shade menu
    pub(crate) fn label(self) -> &'static str {
        match self {
            Shade::Light => "Light",
            Shade::Medium => "Medium",
            Shade::Dark => "Dark",
        }
    }

    /// Parse a 1-based menu answer
    pub(crate) fn from_choice(answer: &str) -> Option<Shade> {
        choose(&Shade::ALL, answer)
    }

    fn index0(self) -> usize {
        match self {
            Shade::Light => 0,
            Shade::Medium => 1,
            Shade::Dark => 2,
        }
    }
}

impl fmt::Display for Shade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn choose<T: Copy>(options: &[T], answer: &str) -> Option<T> {
    let n = answer.trim().parse::<usize>().ok()?;
    options.get(n.checked_sub(1)?).copied()
}

/// A style variable declared in the stylesheet as `--ce-<name>`
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub(crate) enum Variable {
    Primary,
    Secondary,
    Accent,
    MutedForeground,
    Border,
}

impl Variable {
    pub(crate) const ALL: [Variable; 5] = [
        Variable::Primary,
        Variable::Secondary,
        Variable::Accent,
        Variable::MutedForeground,
        Variable::Border,
    ];

    pub(crate) fn property(self) -> &'static str {
        match self {
            Variable::Primary => "--ce-primary",
            Variable::Secondary => "--ce-secondary",
            Variable::Accent => "--ce-accent",
            Variable::MutedForeground => "--ce-muted-foreground",
            Variable::Border => "--ce-border",
        }
    }
}

/// Values for every [`Variable`].  Values are spliced into the stylesheet
/// verbatim and are never parsed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct VariableSet {
    primary: &'static str,
    secondary: &'static str,
    accent: &'static str,
    muted_foreground: &'static str,
    border: &'static str,
}

impl VariableSet {
    const fn new(
        primary: &'static str,
        secondary: &'static str,
        accent: &'static str,
        muted_foreground: &'static str,
        border: &'static str,
    ) -> VariableSet {
        VariableSet {
            primary,
            secondary,
            accent,
            muted_foreground,
            border,
        }
    }

    pub(crate) fn get(&self, var: Variable) -> &'static str {
        match var {
            Variable::Primary => self.primary,
            Variable::Secondary => self.secondary,
            Variable::Accent => self.accent,
            Variable::MutedForeground => self.muted_foreground,
            Variable::Border => self.border,
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (Variable, &'static str)> {
        let set = *self;
        Variable::ALL.into_iter().map(move |var| (var, set.get(var)))
    }
}

/// Look up the variable values for a hue & shade
pub(crate) fn palette(hue: Hue, shade: Shade) -> &'static VariableSet {
    &PALETTES[hue.index0()][shade.index0()]
}

#[rustfmt::skip]
static PALETTES: [[VariableSet; 3]; 6] = [
    // green
    [
        VariableSet::new("142 52% 60%", "142 30% 93%", "142 30% 94%", "142 20% 55%", "142 20% 84%"),
        VariableSet::new("142 71% 42%", "142 25% 90%", "142 25% 91%", "142 15% 50%", "142 15% 80%"),
        VariableSet::new("142 76% 26%", "142 20% 87%", "142 20% 88%", "142 10% 45%", "142 10% 76%"),
    ],
    // red
    [
        VariableSet::new("0 72% 65%", "0 50% 93%", "0 50% 94%", "0 20% 55%", "0 30% 84%"),
        VariableSet::new("0 84% 53%", "0 40% 90%", "0 40% 91%", "0 15% 50%", "0 25% 80%"),
        VariableSet::new("0 72% 38%", "0 25% 87%", "0 25% 88%", "0 10% 45%", "0 15% 76%"),
    ],
    // yellow
    [
        VariableSet::new("48 90% 55%", "48 60% 93%", "48 60% 94%", "48 25% 50%", "48 35% 84%"),
        VariableSet::new("45 93% 45%", "45 50% 90%", "45 50% 91%", "45 20% 45%", "45 30% 80%"),
        VariableSet::new("38 92% 33%", "38 35% 87%", "38 35% 88%", "38 15% 40%", "38 20% 76%"),
    ],
    // purple
    [
        VariableSet::new("270 60% 68%", "270 35% 93%", "270 35% 94%", "270 20% 55%", "270 25% 84%"),
        VariableSet::new("270 70% 52%", "270 30% 90%", "270 30% 91%", "270 15% 50%", "270 20% 80%"),
        VariableSet::new("270 76% 36%", "270 20% 87%", "270 20% 88%", "270 10% 45%", "270 15% 76%"),
    ],
    // blue
    [
        VariableSet::new("210 80% 63%", "210 50% 93%", "210 50% 94%", "210 20% 55%", "210 30% 84%"),
        VariableSet::new("210 100% 48%", "210 45% 90%", "210 45% 91%", "210 15% 50%", "210 25% 80%"),
        VariableSet::new("210 100% 33%", "210 30% 87%", "210 30% 88%", "210 10% 45%", "210 20% 76%"),
    ],
    // orange
    [
        VariableSet::new("24 90% 63%", "24 55% 93%", "24 55% 94%", "24 20% 55%", "24 35% 84%"),
        VariableSet::new("24 100% 50%", "24 45% 90%", "24 45% 91%", "24 15% 50%", "24 25% 80%"),
        VariableSet::new("24 100% 36%", "24 30% 87%", "24 30% 88%", "24 10% 45%", "24 15% 76%"),
    ],
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_palette_is_complete() {
        for hue in Hue::ALL {
            for shade in Shade::ALL {
                let set = palette(hue, shade);
                let vars = set.iter().map(|(var, _)| var).collect::<HashSet<_>>();
                assert_eq!(vars.len(), 5, "{hue} {shade}");
                for (var, value) in set.iter() {
                    assert!(!value.trim().is_empty(), "{hue} {shade} {var:?}");
                }
            }
        }
    }

    #[test]
    fn test_lookup() {
        let set = palette(Hue::Green, Shade::Medium);
        assert_eq!(set.get(Variable::Primary), "142 71% 42%");
        assert_eq!(set.get(Variable::Border), "142 15% 80%");
        let set = palette(Hue::Orange, Shade::Dark);
        assert_eq!(set.get(Variable::MutedForeground), "24 10% 45%");
    }

    #[test]
    fn test_hue_from_choice() {
        assert_eq!(Hue::from_choice("1"), Some(Hue::Green));
        assert_eq!(Hue::from_choice(" 6\n"), Some(Hue::Orange));
        assert_eq!(Hue::from_choice("0"), None);
        assert_eq!(Hue::from_choice("7"), None);
        assert_eq!(Hue::from_choice(""), None);
        assert_eq!(Hue::from_choice("-1"), None);
        assert_eq!(Hue::from_choice("2abc"), None);
        assert_eq!(Hue::from_choice("green"), None);
    }

    #[test]
    fn test_shade_from_choice() {
        assert_eq!(Shade::from_choice("1"), Some(Shade::Light));
        assert_eq!(Shade::from_choice("2\r\n"), Some(Shade::Medium));
        assert_eq!(Shade::from_choice("3"), Some(Shade::Dark));
        assert_eq!(Shade::from_choice("4"), None);
        assert_eq!(Shade::from_choice("  "), None);
    }
}
