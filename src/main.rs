use std::env;
use std::process;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool};

use cesar::cesar::{display_text, load_image, run};
use cesar::cpu::disasm::{disasm};
use cesar::types::{Adr};
use cesar::{CesarError, Cpu, Result, RunConfig};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        Some("--disasm") => disasm_command(&args[1..]),
        Some(_) => run_command(&args),
        None => Err(CesarError::InvalidArgument(usage())),
    };
    if let Err(err) = result {
        eprintln!("{}", err);
        process::exit(1);
    }
}

fn usage() -> String {
    "usage: cesar <image.mem> [pc-hex] [breakpoint-hex]\n       cesar --disasm <image.mem> <start-hex> <count>".to_string()
}

fn parse_hex(s: &str) -> Result<Adr> {
    let digits = s.trim_start_matches("0x").trim_start_matches("0X");
    Adr::from_str_radix(digits, 16)
        .map_err(|_| CesarError::InvalidArgument(format!("not a hex address: {}", s)))
}

fn load_cpu(path: &str) -> Result<Cpu> {
    let body = load_image(path)?;
    let mut cpu = Cpu::new();
    cpu.set_memory(&body);
    Ok(cpu)
}

fn run_command(args: &[String]) -> Result<()> {
    let cpu = load_cpu(&args[0])?;
    let mut config = RunConfig::default();
    if let Some(pc) = args.get(1) {
        config.start_pc = Some(parse_hex(pc)?);
    }
    if let Some(bp) = args.get(2) {
        config.breakpoint = Some(parse_hex(bp)?);
    }

    let cpu = Mutex::new(cpu);
    let running = AtomicBool::new(true);
    let summary = run(&cpu, &running, &config, |_| {});
    let cpu = match cpu.into_inner() {
        Ok(cpu) => cpu,
        Err(poisoned) => poisoned.into_inner(),
    };

    match summary.result {
        Some(result) => println!("{:?} after {} steps", result, summary.steps),
        None => println!("stopped after {} steps", summary.steps),
    }
    println!("{}", cpu.state_line());
    println!("accesses: {}", cpu.access_count());
    println!("display: [{}]", display_text(&cpu));
    Ok(())
}

fn disasm_command(args: &[String]) -> Result<()> {
    if args.len() < 3 {
        return Err(CesarError::InvalidArgument(usage()));
    }
    let cpu = load_cpu(&args[0])?;
    let start = parse_hex(&args[1])?;
    let count: usize = args[2].parse()
        .map_err(|_| CesarError::InvalidArgument(format!("not a count: {}", args[2])))?;

    for (adr, text) in cpu.mnemonics().instructions(start, 0xffff).take(count) {
        let (sz, _) = disasm(cpu.memory(), adr);
        let bytes = (0..sz)
            .map(|i| format!("{:02x}", cpu.memory_byte(adr.wrapping_add(i as Adr))))
            .collect::<Vec<String>>().join(" ");
        println!("{:04x}: {:<18} {}", adr, bytes, text);
    }
    Ok(())
}
