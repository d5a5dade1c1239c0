mod demo;
mod keymap;
mod machine;

use std::io::Write as _;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::info;
use pixels::{Pixels, SurfaceTexture};
use winit::{
    event::{ElementState, Event, VirtualKeyCode, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use catsemu_core::{cartridge, clock::FrameClock};
use machine::Machine;

const TICK_HZ: u32 = 60;

#[derive(Parser)]
#[command(about = "CHIP-8 and Game Boy emulator")]
struct Args {
    /// Path to a ROM file (.ch8/.c8 for CHIP-8, .gb/.gbc for Game Boy)
    rom: Option<PathBuf>,

    /// Boot a built-in Game Boy demo instead of a ROM file
    #[arg(long, value_parser = demo::NAMES, conflicts_with = "rom")]
    demo: Option<String>,

    /// CHIP-8 instructions per 60 Hz tick (9 is about 540 IPS)
    #[arg(long, default_value_t = catsemu_core::chip8::DEFAULT_BATCH)]
    batch: u32,

    /// Seed for the CHIP-8 random stream
    #[arg(long)]
    seed: Option<u32>,

    /// Integer window scale (defaults to 9 for CHIP-8, 3 for Game Boy)
    #[arg(long)]
    scale: Option<u32>,

    /// Run without opening a window
    #[arg(long)]
    headless: bool,

    /// Number of frames to run in headless mode
    #[arg(long, default_value_t = 600)]
    frames: u64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let machine = match load_machine(&args) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    if args.headless {
        match machine {
            Some(machine) => run_headless(machine, args.frames),
            None => eprintln!("headless mode needs a ROM or --demo"),
        }
        return;
    }

    run_windowed(machine, args.scale);
}

/// Build the machine selected on the command line; `None` means the shell
/// opens idle, with nothing loaded.
fn load_machine(args: &Args) -> Result<Option<Machine>, String> {
    if let Some(name) = &args.demo {
        let machine = Machine::gameboy_from_bytes(demo::build(name))
            .map_err(|e| format!("failed to build demo: {e}"))?;
        return Ok(Some(configure(machine, args)));
    }

    let Some(path) = &args.rom else {
        info!("no ROM supplied, opening idle");
        return Ok(None);
    };

    // GBA images are recognized by title only and never executed.
    if path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gba"))
    {
        let data = std::fs::read(path).map_err(|e| format!("failed to read ROM: {e}"))?;
        match cartridge::gba_title(&data) {
            Some(title) => println!("GBA cartridge \"{title}\": execution is not supported"),
            None => eprintln!("file is too short to be a GBA image"),
        }
        std::process::exit(0);
    }

    let machine = Machine::from_file(path).map_err(|e| format!("failed to load ROM: {e}"))?;
    Ok(Some(configure(machine, args)))
}

fn configure(mut machine: Machine, args: &Args) -> Machine {
    if let Machine::Chip8 { vm, .. } = &mut machine {
        vm.batch_size = args.batch;
        if let Some(seed) = args.seed {
            vm.set_random_seed(seed);
        }
    }
    info!("{} core ready", machine.name());
    machine
}

fn run_headless(mut machine: Machine, frames: u64) {
    let start = Instant::now();
    for _ in 0..frames {
        machine.tick();
        machine.take_bell();
    }
    let elapsed = start.elapsed().as_secs_f64();
    println!("{}", machine.debug_state());
    println!(
        "{frames} frames in {elapsed:.3}s ({:.1} fps)",
        frames as f64 / elapsed.max(f64::EPSILON)
    );
}

fn run_windowed(mut machine: Option<Machine>, scale: Option<u32>) {
    let (width, height) = machine.as_ref().map(|m| m.dims()).unwrap_or((160, 144));
    let scale = scale
        .or_else(|| machine.as_ref().map(|m| m.default_scale()))
        .unwrap_or(3)
        .max(1);

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("catsemu")
        .with_inner_size(winit::dpi::LogicalSize::new(
            (width * scale) as f64,
            (height * scale) as f64,
        ))
        .build(&event_loop)
        .expect("failed to create window");

    let size = window.inner_size();
    let surface = SurfaceTexture::new(size.width, size.height, &window);
    let mut pixels = Pixels::new(width, height, surface).expect("failed to create surface");

    let mut clock = FrameClock::new(TICK_HZ);
    let mut paused = false;
    let mut ticks = 0u32;
    let mut fps_window = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        match event {
            Event::NewEvents(_) => {
                let now = Instant::now();
                if clock.due(now) {
                    if !paused {
                        if let Some(machine) = machine.as_mut() {
                            machine.tick();
                            if machine.take_bell() {
                                ring_bell();
                            }
                            window.request_redraw();
                        }
                    }
                    clock.advance(now);

                    ticks += 1;
                    if ticks >= TICK_HZ {
                        let elapsed = fps_window.elapsed().as_secs_f64();
                        let fps = ticks as f64 / elapsed.max(f64::EPSILON);
                        let state = if paused { "paused" } else { "running" };
                        window.set_title(&format!("catsemu - {state} - {fps:.0} fps"));
                        ticks = 0;
                        fps_window = Instant::now();
                    }
                }
                *control_flow = ControlFlow::WaitUntil(clock.deadline());
            }
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                WindowEvent::Resized(size) => {
                    let _ = pixels.resize_surface(size.width, size.height);
                }
                WindowEvent::KeyboardInput { input, .. } => {
                    let Some(key) = input.virtual_keycode else {
                        return;
                    };
                    let pressed = input.state == ElementState::Pressed;
                    match key {
                        VirtualKeyCode::Escape if pressed => {
                            *control_flow = ControlFlow::Exit;
                        }
                        VirtualKeyCode::Space if pressed => {
                            paused = !paused;
                        }
                        // F5 rather than R: the letter keys all belong to
                        // the CHIP-8 keypad.
                        VirtualKeyCode::F5 if pressed => {
                            if let Some(machine) = machine.as_mut() {
                                machine.reset();
                            }
                        }
                        _ => {
                            if let Some(machine) = machine.as_mut() {
                                machine.key_event(key, pressed);
                            }
                        }
                    }
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                if let Some(machine) = machine.as_ref() {
                    machine.render(pixels.frame_mut());
                }
                if pixels.render().is_err() {
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    });
}

/// Minimal audible cue for the CHIP-8 sound timer.
fn ring_bell() {
    let mut out = std::io::stdout();
    let _ = out.write_all(b"\x07");
    let _ = out.flush();
}
