/// Separator placed between the instructions, the prompt, and every modifier note.
pub const SECTION_SEPARATOR: &str = "\n\n";

/// Behavior switches that append a fixed note to the payload.
///
/// Declaration order is the order notes appear in the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    ThreeAlternatives,
    BackgroundAgents,
}

impl Modifier {
    pub const ALL: [Modifier; 2] = [Modifier::ThreeAlternatives, Modifier::BackgroundAgents];

    pub fn description(self) -> &'static str {
        match self {
            Modifier::ThreeAlternatives => {
                "--3 modificator enabled: Generate three alternative solutions"
            }
            Modifier::BackgroundAgents => "-b modificator enabled: Spawn sub-agents in background",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPayload {
    text: String,
}

impl ComposedPayload {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Length in characters, as shown to the user before the assistant runs.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Joins the instructions and the prompt, then appends one note per active
/// modifier. Duplicates in `modifiers` collapse and input order is ignored.
pub fn compose(instructions: &str, prompt: &str, modifiers: &[Modifier]) -> ComposedPayload {
    let active: Vec<Modifier> = Modifier::ALL
        .into_iter()
        .filter(|modifier| modifiers.contains(modifier))
        .collect();

    let extra: usize = active
        .iter()
        .map(|modifier| SECTION_SEPARATOR.len() + modifier.description().len())
        .sum();
    let mut text =
        String::with_capacity(instructions.len() + SECTION_SEPARATOR.len() + prompt.len() + extra);

    text.push_str(instructions);
    text.push_str(SECTION_SEPARATOR);
    text.push_str(prompt);

    for modifier in active {
        text.push_str(SECTION_SEPARATOR);
        text.push_str(modifier.description());
    }

    tracing::debug!(
        modifiers = ?modifiers,
        chars = text.chars().count(),
        "composed assistant payload"
    );

    ComposedPayload { text }
}
