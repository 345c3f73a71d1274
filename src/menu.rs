pub trait MenuItem: Copy + PartialEq + 'static {
    fn label(self) -> &'static str;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MainMenuItem {
    NewGame,
    Quit,
}

impl MenuItem for MainMenuItem {
    fn label(self) -> &'static str {
        match self {
            MainMenuItem::NewGame => "New game",
            MainMenuItem::Quit => "Quit",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PauseMenuItem {
    Resume,
    MainMenu,
}

impl MenuItem for PauseMenuItem {
    fn label(self) -> &'static str {
        match self {
            PauseMenuItem::Resume => "Resume",
            PauseMenuItem::MainMenu => "Main menu",
        }
    }
}

pub const MAIN_MENU_ITEMS: [MainMenuItem; 2] = [MainMenuItem::NewGame, MainMenuItem::Quit];
pub const PAUSE_MENU_ITEMS: [PauseMenuItem; 2] = [PauseMenuItem::Resume, PauseMenuItem::MainMenu];

/// A vertical list of options with one highlighted entry.
pub struct Menu<T: MenuItem> {
    items: &'static [T],
    selected_index: usize,
}

pub type MainMenu = Menu<MainMenuItem>;
pub type PauseMenu = Menu<PauseMenuItem>;

impl MainMenu {
    pub fn main() -> Self {
        Menu::new(&MAIN_MENU_ITEMS)
    }
}

impl PauseMenu {
    pub fn pause() -> Self {
        Menu::new(&PAUSE_MENU_ITEMS)
    }
}

impl<T: MenuItem> Menu<T> {
    pub fn new(items: &'static [T]) -> Self {
        assert!(!items.is_empty(), "menu needs at least one item");
        Menu {
            items,
            selected_index: 0,
        }
    }

    pub fn items(&self) -> &'static [T] {
        self.items
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected(&self) -> T {
        self.items[self.selected_index]
    }

    pub fn next(&mut self) {
        self.selected_index = (self.selected_index + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        if self.selected_index == 0 {
            self.selected_index = self.items.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    pub fn reset(&mut self) {
        self.selected_index = 0;
    }

    /// Highlights `index`; out-of-range indices leave the selection alone.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.selected_index = index;
        true
    }
}
