//! User configuration — keybindings, carousel tuning, persistence.
//!
//! Stored as TOML at `$XDG_CONFIG_HOME/folio/config.toml`
//! (default `~/.config/folio/config.toml`):
//!
//! ```toml
//! [carousel]
//! card_width = 36
//! card_gap = 2
//! scroll_duration_ms = 800
//! recenter_low = 0.5
//! recenter_high = 2.5
//!
//! [hero]
//! cubes = 25
//! parallax_smoothing = 0.1
//! seed = 1
//!
//! [keys]
//! next = ["Right", "l"]
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::core::animator::DEFAULT_SCROLL_DURATION;
use crate::core::tracker::{CardGeometry, RecenterBounds};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Next,
    Previous,
    NudgeLeft,
    NudgeRight,
    OpenLink,
    ShowAbout,
    ShowTechnologies,
    ShowControls,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the controls overlay).
    pub const ALL: &[Action] = &[
        Action::Next,
        Action::Previous,
        Action::NudgeLeft,
        Action::NudgeRight,
        Action::OpenLink,
        Action::ShowAbout,
        Action::ShowTechnologies,
        Action::ShowControls,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::Next => "Next Project",
            Action::Previous => "Previous Project",
            Action::NudgeLeft => "Scroll Left",
            Action::NudgeRight => "Scroll Right",
            Action::OpenLink => "Open Project Link",
            Action::ShowAbout => "About",
            Action::ShowTechnologies => "Technologies",
            Action::ShowControls => "Show Controls",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the `[keys]` table.
    fn config_key(self) -> &'static str {
        match self {
            Action::Next => "next",
            Action::Previous => "previous",
            Action::NudgeLeft => "nudge_left",
            Action::NudgeRight => "nudge_right",
            Action::OpenLink => "open_link",
            Action::ShowAbout => "show_about",
            Action::ShowTechnologies => "show_technologies",
            Action::ShowControls => "show_controls",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared.  Upper-case letters arrive with SHIFT already folded
    /// into the character, so SHIFT is ignored for `Char` codes.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mut mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        if matches!(self.code, KeyCode::Char(_)) {
            mask.remove(KeyModifiers::SHIFT);
        }
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"Shift+←"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            _ => self.code_name(),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Shift+Left"`, `"q"`).
    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&self.code_name());
        s
    }

    fn code_name(&self) -> String {
        match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::Backspace => "Backspace".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        }
    }

    /// Parse a key string like `"Ctrl+c"`, `"Shift+Left"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        // Single characters keep their case: `L` and `l` are different keys.
        if key_part.chars().count() == 1 {
            return Some(KeyBind::new(KeyCode::Char(key_part.chars().next()?), modifiers));
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') => KeyCode::F(s[1..].parse().ok()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

// ───────────────────────────────────────── file format ───────

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    carousel: CarouselSection,
    #[serde(default)]
    hero: HeroSection,
    #[serde(default)]
    keys: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CarouselSection {
    card_width: Option<u16>,
    card_gap: Option<u16>,
    scroll_duration_ms: Option<u64>,
    recenter_low: Option<f64>,
    recenter_high: Option<f64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HeroSection {
    cubes: Option<usize>,
    parallax_smoothing: Option<f64>,
    seed: Option<u64>,
}

// ───────────────────────────────────────── config ────────────

/// Carousel tuning.  Widths are in terminal columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselSettings {
    pub card_width: u16,
    pub card_gap: u16,
    pub scroll_duration: Duration,
    pub recenter: RecenterBounds,
}

impl CarouselSettings {
    pub fn geometry(&self) -> CardGeometry {
        CardGeometry::new(self.card_width as f64, self.card_gap as f64)
    }
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            card_width: 36,
            card_gap: 2,
            scroll_duration: DEFAULT_SCROLL_DURATION,
            recenter: RecenterBounds::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeroSettings {
    pub cubes: usize,
    pub parallax_smoothing: f64,
    pub seed: u64,
}

impl Default for HeroSettings {
    fn default() -> Self {
        Self {
            cubes: 25,
            parallax_smoothing: 0.1,
            seed: 1,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub carousel: CarouselSettings,
    pub hero: HeroSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            carousel: CarouselSettings::default(),
            hero: HeroSettings::default(),
        }
    }
}

impl AppConfig {
    /// Built-in key bindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let shift = KeyModifiers::SHIFT;
        let mut m = HashMap::new();

        m.insert(Next, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(Previous, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(NudgeLeft, vec![KeyBind::new(Left, shift), KeyBind::new(Char('H'), n)]);
        m.insert(NudgeRight, vec![KeyBind::new(Right, shift), KeyBind::new(Char('L'), n)]);
        m.insert(OpenLink, vec![KeyBind::new(Enter, n)]);
        m.insert(ShowAbout, vec![KeyBind::new(Char('a'), n)]);
        m.insert(ShowTechnologies, vec![KeyBind::new(Char('t'), n)]);
        m.insert(ShowControls, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Format the binding list for a given action (e.g. `"→/l"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: browse | {}: open link | {}: about | {}: technologies | {}: controls | {}: quit",
            self.short_binding(Action::Previous),
            self.short_binding(Action::Next),
            self.short_binding(Action::OpenLink),
            self.short_binding(Action::ShowAbout),
            self.short_binding(Action::ShowTechnologies),
            self.short_binding(Action::ShowControls),
            self.short_binding(Action::Quit),
        )
    }

    /// Status-bar hint while an about or technologies page is open.
    pub fn page_hint(&self) -> String {
        format!(
            "Esc: back | ↑/↓: scroll | {}: about | {}: technologies | {}: quit",
            self.short_binding(Action::ShowAbout),
            self.short_binding(Action::ShowTechnologies),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from `path`.  A missing file yields defaults; a
    /// malformed one yields defaults plus a warning.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match Self::parse(&contents) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "ignoring malformed config");
                Self::default()
            }
        }
    }

    /// Persist current config to the default location.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise()?)?;
        Ok(())
    }

    fn parse(s: &str) -> Result<Self, toml::de::Error> {
        let file: ConfigFile = toml::from_str(s)?;
        let defaults = Self::default();

        let c = file.carousel;
        let mut recenter = defaults.carousel.recenter;
        if let Some(low) = c.recenter_low {
            if low > 0.0 && low < 1.0 {
                recenter.low = low;
            } else {
                tracing::warn!(low, "recenter_low must lie in (0, 1); keeping default");
            }
        }
        if let Some(high) = c.recenter_high {
            if high > 2.0 && high < 3.0 {
                recenter.high = high;
            } else {
                tracing::warn!(high, "recenter_high must lie in (2, 3); keeping default");
            }
        }
        let carousel = CarouselSettings {
            card_width: c
                .card_width
                .map_or(defaults.carousel.card_width, |w| w.clamp(12, 120)),
            card_gap: c
                .card_gap
                .map_or(defaults.carousel.card_gap, |g| g.min(16)),
            scroll_duration: c.scroll_duration_ms.map_or(defaults.carousel.scroll_duration, |ms| {
                Duration::from_millis(ms.clamp(50, 5000))
            }),
            recenter,
        };

        let h = file.hero;
        let hero = HeroSettings {
            cubes: h.cubes.map_or(defaults.hero.cubes, |n| n.min(200)),
            parallax_smoothing: h
                .parallax_smoothing
                .map_or(defaults.hero.parallax_smoothing, |s| s.clamp(0.01, 1.0)),
            seed: h.seed.unwrap_or(defaults.hero.seed),
        };

        let mut bindings = defaults.bindings;
        for (key, values) in file.keys {
            let Some(action) = Action::from_config_key(&key) else {
                tracing::warn!(%key, "unknown action in [keys]");
                continue;
            };
            let parsed: Vec<KeyBind> = values.iter().filter_map(|v| KeyBind::parse(v.trim())).collect();
            if !parsed.is_empty() {
                bindings.insert(action, parsed);
            }
        }

        Ok(Self {
            bindings,
            carousel,
            hero,
        })
    }

    fn serialise(&self) -> anyhow::Result<String> {
        let keys = Action::ALL
            .iter()
            .filter_map(|&action| {
                let binds = self.bindings.get(&action)?;
                let keys = binds.iter().map(KeyBind::to_config_string).collect();
                Some((action.config_key().to_string(), keys))
            })
            .collect();

        let file = ConfigFile {
            carousel: CarouselSection {
                card_width: Some(self.carousel.card_width),
                card_gap: Some(self.carousel.card_gap),
                scroll_duration_ms: Some(self.carousel.scroll_duration.as_millis() as u64),
                recenter_low: Some(self.carousel.recenter.low),
                recenter_high: Some(self.carousel.recenter.high),
            },
            hero: HeroSection {
                cubes: Some(self.hero.cubes),
                parallax_smoothing: Some(self.hero.parallax_smoothing),
                seed: Some(self.hero.seed),
            },
            keys,
        };
        Ok(format!("# folio configuration\n\n{}", toml::to_string(&file)?))
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/folio/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("folio").join("config.toml")
}
