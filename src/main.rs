use std::path::{Path, PathBuf};

use ::rand::rngs::StdRng;
use ::rand::SeedableRng;
use clap::Parser;
use log::{info, warn};
use macroquad::prelude::*;
use macroquad::window::Conf;

use block_tetris::render::{self, Layout};
use block_tetris::{Controls, PlayArea, Settings};

#[derive(Parser, Debug)]
#[command(name = "block_tetris", version, about = "Falling-block puzzle game")]
struct Cli {
    /// JSON settings file (field size, gravity interval, ...)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the figure sequence
    #[arg(long)]
    seed: Option<u64>,
}

fn load_settings(path: Option<&Path>) -> Settings {
    let Some(path) = path else {
        return Settings::default();
    };
    match Settings::load(path) {
        Ok(settings) => {
            info!("loaded settings from {}", path.display());
            settings
        }
        Err(err) => {
            warn!("{err}; falling back to default settings");
            Settings::default()
        }
    }
}

fn window_conf() -> Conf {
    let (width, height) = Layout::new(&Settings::default()).window_size();
    Conf {
        window_title: "Tetris".to_owned(),
        window_width: width as i32,
        window_height: height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref());
    let (width, height) = Layout::new(&settings).window_size();
    request_new_screen_size(width, height);

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut play_area = PlayArea::new(settings, rng);
    let mut controls = Controls::new();

    loop {
        let dt = get_frame_time();
        let layout = Layout::of(&play_area);
        for command in controls.poll(play_area.state(), &layout, render::menu_top(), dt) {
            play_area.handle(command);
        }
        if play_area.should_quit() {
            break;
        }
        play_area.update(dt);
        render::draw(&play_area);
        next_frame().await;
    }
}
