use crate::commands::{CommandSender, HudCommand};
use std::fmt;

/// Keys the overlay can bind or needs to track as modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Space,
    Tab,
    Return,
    Escape,
    Delete,
    Backspace,
    CapsLock,
    Home,
    End,
    PageUp,
    PageDown,
    LeftArrow,
    RightArrow,
    UpArrow,
    DownArrow,
    Insert,
    ScrollLock,
    Pause,
    Num(u8),
    Letter(char),
    ControlLeft,
    ControlRight,
    ShiftLeft,
    ShiftRight,
    Alt,
    AltGr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotkey {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Default for Hotkey {
    fn default() -> Self {
        Self {
            key: Key::F2,
            ctrl: false,
            shift: false,
            alt: false,
        }
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.shift {
            write!(f, "Shift+")?;
        }
        if self.alt {
            write!(f, "Alt+")?;
        }
        match self.key {
            Key::Num(n) => write!(f, "{n}"),
            Key::Letter(c) => write!(f, "{c}"),
            Key::Return => write!(f, "Enter"),
            Key::LeftArrow => write!(f, "Left"),
            Key::RightArrow => write!(f, "Right"),
            Key::UpArrow => write!(f, "Up"),
            Key::DownArrow => write!(f, "Down"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Parse a hotkey string like "Ctrl+Shift+Space" into a [`Hotkey`].
pub fn parse_hotkey(s: &str) -> Option<Hotkey> {
    let mut ctrl = false;
    let mut shift = false;
    let mut alt = false;
    let mut key: Option<Key> = None;

    for part in s.split('+') {
        let upper = part.trim().to_ascii_uppercase();
        match upper.as_str() {
            "CTRL" | "CONTROL" => ctrl = true,
            "SHIFT" => shift = true,
            "ALT" => alt = true,
            "" => {}
            _ => {
                if key.is_some() {
                    return None;
                }
                key = Some(parse_key(&upper)?);
            }
        }
    }

    key.map(|k| Hotkey {
        key: k,
        ctrl,
        shift,
        alt,
    })
}

fn parse_key(upper: &str) -> Option<Key> {
    match upper {
        "SPACE" => Some(Key::Space),
        "TAB" => Some(Key::Tab),
        "ENTER" | "RETURN" => Some(Key::Return),
        "ESC" | "ESCAPE" => Some(Key::Escape),
        "DELETE" => Some(Key::Delete),
        "BACKSPACE" => Some(Key::Backspace),
        "CAPSLOCK" => Some(Key::CapsLock),
        "HOME" => Some(Key::Home),
        "END" => Some(Key::End),
        "PAGEUP" => Some(Key::PageUp),
        "PAGEDOWN" => Some(Key::PageDown),
        "INSERT" => Some(Key::Insert),
        "SCROLLLOCK" => Some(Key::ScrollLock),
        "PAUSE" => Some(Key::Pause),
        "LEFT" | "LEFTARROW" => Some(Key::LeftArrow),
        "RIGHT" | "RIGHTARROW" => Some(Key::RightArrow),
        "UP" | "UPARROW" => Some(Key::UpArrow),
        "DOWN" | "DOWNARROW" => Some(Key::DownArrow),
        _ if upper.len() > 1 && upper.starts_with('F') => match upper[1..].parse::<u8>().ok()? {
            1 => Some(Key::F1),
            2 => Some(Key::F2),
            3 => Some(Key::F3),
            4 => Some(Key::F4),
            5 => Some(Key::F5),
            6 => Some(Key::F6),
            7 => Some(Key::F7),
            8 => Some(Key::F8),
            9 => Some(Key::F9),
            10 => Some(Key::F10),
            11 => Some(Key::F11),
            12 => Some(Key::F12),
            _ => None,
        },
        _ => {
            let mut chars = upper.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            if let Some(d) = c.to_digit(10) {
                Some(Key::Num(d as u8))
            } else if c.is_ascii_alphabetic() {
                Some(Key::Letter(c))
            } else {
                None
            }
        }
    }
}

/// Modifier and watched-key bookkeeping for one hotkey.
///
/// Fires once per press of the full combination; holding the key (OS key
/// repeat) does not fire again until the combination is released.
#[derive(Debug, Default)]
pub struct ComboState {
    ctrl: bool,
    shift: bool,
    alt: bool,
    watch: bool,
    triggered: bool,
}

impl ComboState {
    /// Feed a key event and return `true` when the hotkey just fired.
    pub fn handle(&mut self, hotkey: &Hotkey, key: Key, pressed: bool) -> bool {
        match key {
            Key::ControlLeft | Key::ControlRight => self.ctrl = pressed,
            Key::ShiftLeft | Key::ShiftRight => self.shift = pressed,
            Key::Alt | Key::AltGr => self.alt = pressed,
            _ => {}
        }
        if key == hotkey.key {
            self.watch = pressed;
        }

        let combo = self.watch
            && (!hotkey.ctrl || self.ctrl)
            && (!hotkey.shift || self.shift)
            && (!hotkey.alt || self.alt);
        if combo {
            if !self.triggered {
                self.triggered = true;
                return true;
            }
        } else {
            if self.triggered {
                tracing::debug!("combo released");
            }
            self.triggered = false;
        }
        false
    }
}

/// Global hotkey that posts [`HudCommand::Toggle`] to the UI loop.
#[derive(Clone)]
pub struct HotkeyTrigger {
    pub hotkey: Hotkey,
    commands: CommandSender,
}

impl HotkeyTrigger {
    pub fn new(hotkey: Hotkey, commands: CommandSender) -> Self {
        Self { hotkey, commands }
    }

    /// Forward a raw key event; returns `true` when a toggle was posted.
    pub fn on_key(&self, state: &mut ComboState, key: Key, pressed: bool) -> bool {
        if state.handle(&self.hotkey, key, pressed) {
            tracing::debug!(hotkey = %self.hotkey, "hotkey match -> toggle");
            return self.commands.send(HudCommand::Toggle);
        }
        false
    }

    /// Spawn the listener thread. Global keyboard hooks are only wired up on
    /// Windows; elsewhere the overlay runs without a hotkey.
    #[cfg(target_os = "windows")]
    pub fn start_listener(self) {
        use std::thread;
        use std::time::Duration;

        tracing::debug!("starting hotkey listener for {}", self.hotkey);
        let spawned = thread::Builder::new()
            .name("hotkey".into())
            .spawn(move || loop {
                if self.commands.is_stopped() {
                    return;
                }
                let mut state = ComboState::default();
                let trigger = self.clone();
                let result = rdev::listen(move |event| {
                    let (key, pressed) = match event.event_type {
                        rdev::EventType::KeyPress(k) => (k, true),
                        rdev::EventType::KeyRelease(k) => (k, false),
                        _ => return,
                    };
                    if let Some(key) = key_from_rdev(key) {
                        trigger.on_key(&mut state, key, pressed);
                    }
                });
                match result {
                    Ok(()) => tracing::warn!("Hotkey listener exited unexpectedly. Restarting shortly"),
                    Err(e) => tracing::warn!("Hotkey listener failed: {:?}. Retrying shortly", e),
                }
                thread::sleep(Duration::from_millis(500));
            });
        if let Err(e) = spawned {
            tracing::warn!("failed to spawn hotkey listener: {e}");
        }
    }

    #[cfg(not(target_os = "windows"))]
    pub fn start_listener(self) {
        tracing::warn!(
            hotkey = %self.hotkey,
            "global hotkeys are not supported on this platform; use the tray menu instead"
        );
    }
}

#[cfg(target_os = "windows")]
fn key_from_rdev(key: rdev::Key) -> Option<Key> {
    use rdev::Key as R;
    Some(match key {
        R::F1 => Key::F1,
        R::F2 => Key::F2,
        R::F3 => Key::F3,
        R::F4 => Key::F4,
        R::F5 => Key::F5,
        R::F6 => Key::F6,
        R::F7 => Key::F7,
        R::F8 => Key::F8,
        R::F9 => Key::F9,
        R::F10 => Key::F10,
        R::F11 => Key::F11,
        R::F12 => Key::F12,
        R::Space => Key::Space,
        R::Tab => Key::Tab,
        R::Return => Key::Return,
        R::Escape => Key::Escape,
        R::Delete => Key::Delete,
        R::Backspace => Key::Backspace,
        R::CapsLock => Key::CapsLock,
        R::Home => Key::Home,
        R::End => Key::End,
        R::PageUp => Key::PageUp,
        R::PageDown => Key::PageDown,
        R::LeftArrow => Key::LeftArrow,
        R::RightArrow => Key::RightArrow,
        R::UpArrow => Key::UpArrow,
        R::DownArrow => Key::DownArrow,
        R::Insert => Key::Insert,
        R::ScrollLock => Key::ScrollLock,
        R::Pause => Key::Pause,
        R::ControlLeft => Key::ControlLeft,
        R::ControlRight => Key::ControlRight,
        R::ShiftLeft => Key::ShiftLeft,
        R::ShiftRight => Key::ShiftRight,
        R::Alt => Key::Alt,
        R::AltGr => Key::AltGr,
        R::Num0 => Key::Num(0),
        R::Num1 => Key::Num(1),
        R::Num2 => Key::Num(2),
        R::Num3 => Key::Num(3),
        R::Num4 => Key::Num(4),
        R::Num5 => Key::Num(5),
        R::Num6 => Key::Num(6),
        R::Num7 => Key::Num(7),
        R::Num8 => Key::Num(8),
        R::Num9 => Key::Num(9),
        R::KeyA => Key::Letter('A'),
        R::KeyB => Key::Letter('B'),
        R::KeyC => Key::Letter('C'),
        R::KeyD => Key::Letter('D'),
        R::KeyE => Key::Letter('E'),
        R::KeyF => Key::Letter('F'),
        R::KeyG => Key::Letter('G'),
        R::KeyH => Key::Letter('H'),
        R::KeyI => Key::Letter('I'),
        R::KeyJ => Key::Letter('J'),
        R::KeyK => Key::Letter('K'),
        R::KeyL => Key::Letter('L'),
        R::KeyM => Key::Letter('M'),
        R::KeyN => Key::Letter('N'),
        R::KeyO => Key::Letter('O'),
        R::KeyP => Key::Letter('P'),
        R::KeyQ => Key::Letter('Q'),
        R::KeyR => Key::Letter('R'),
        R::KeyS => Key::Letter('S'),
        R::KeyT => Key::Letter('T'),
        R::KeyU => Key::Letter('U'),
        R::KeyV => Key::Letter('V'),
        R::KeyW => Key::Letter('W'),
        R::KeyX => Key::Letter('X'),
        R::KeyY => Key::Letter('Y'),
        R::KeyZ => Key::Letter('Z'),
        _ => return None,
    })
}
