use anyhow::{bail, Context, Result};
use ecurve::{
    file_format::{format_output, Input},
    Computer,
};
use log::{info, LevelFilter};
use std::fs;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(
    name = "ecurve",
    about = "Program for elliptic curve points sum calculation"
)]
struct Opt {
    #[structopt(short, long, default_value = "input.txt", help = "input file path")]
    input: PathBuf,
    #[structopt(short, long, default_value = "output.txt", help = "output file path")]
    output: PathBuf,
    #[structopt(short, long, help = "debug mode")]
    debug: bool,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    let level = if opt.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    if !opt.input.exists() {
        bail!("输入文件不存在: {}", opt.input.display());
    }

    let text = fs::read_to_string(&opt.input)
        .with_context(|| format!("无法读取 {}", opt.input.display()))?;
    let input: Input = text.parse()?;
    let mut computer = Computer::new(input.curve()?);
    info!("{}", computer.curve());

    for instruction in &input.instructions {
        if opt.debug {
            println!("instruction: {}", instruction);
        }

        computer
            .calc(instruction)
            .with_context(|| format!("无法计算 `{}`", instruction))?;
    }

    if opt.debug {
        let answers: Vec<String> = computer
            .cache()
            .map(|(raw, point)| format!("{}: {}", raw, point))
            .collect();
        println!("answer: {{{}}}", answers.join(", "));
    }

    fs::write(&opt.output, format_output(&computer))
        .with_context(|| format!("无法写入 {}", opt.output.display()))?;
    println!(
        "Result has been written in file `{}`",
        opt.output.display()
    );

    Ok(())
}
