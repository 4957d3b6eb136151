use std::fs::File;
use std::io::{
    BufRead,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};
use std::{
    fs,
    io,
};

use clap::value_parser;
use clap_complete::{
    Shell,
    generate,
};
use km_core::errors::*;
use km_core::prelude::*;

const BIN_NAME: &str = "kubemart";

#[derive(clap::Args)]
pub struct Args {
    #[arg(
        long_help = "name of the shell to generate completion files for",
        value_parser = value_parser!(clap_complete::Shell),
    )]
    pub shell: Shell,

    #[arg(short = 'o', long = "stdout", long_help = "print to stdout")]
    pub stdout: bool,
}

pub(super) fn default_path_for(shell: &Shell) -> PathBuf {
    let mut default_path = dirs::data_dir().unwrap_or(PathBuf::from("."));
    match shell {
        Shell::Bash => default_path.push("bash-completion/completions"),
        Shell::Elvish => default_path.push("elvish/lib"),
        Shell::Fish => default_path.push("fish/vendor_completions.d"),
        Shell::PowerShell => default_path.push("Kubemart"),
        Shell::Zsh => default_path.push("zsh/site-functions"),
        _ => (),
    };
    default_path
}

fn completion_filename_for(shell: &Shell) -> String {
    match shell {
        Shell::Elvish => format!("{BIN_NAME}.elv"),
        Shell::Fish => format!("{BIN_NAME}.fish"),
        Shell::PowerShell => "TabCompletions.ps1".into(),
        Shell::Zsh => format!("_{BIN_NAME}"),
        _ => BIN_NAME.into(),
    }
}

pub(super) fn prompt_for_location(shell: &Shell, input: &mut impl BufRead) -> anyhow::Result<PathBuf> {
    let default_path = default_path_for(shell);
    println!("Where should the completions file go? Press enter for the default ({})", default_path.display());

    let pathname = input.lines().next().ok_or(anyhow!("could not read stdin"))??;
    let mut path = match pathname.trim() {
        "" => default_path,
        p if p.starts_with('~') => {
            let rest = p.strip_prefix("~/").ok_or(anyhow!("other users' home directories are not supported"))?;
            dirs::home_dir().ok_or(anyhow!("could not compute home dir"))?.join(rest)
        },
        p => PathBuf::from(p),
    };

    path.push(completion_filename_for(shell));
    Ok(path)
}

fn print_extra_info(shell: &Shell, path: &Path) {
    match shell {
        Shell::Elvish => println!("Now add `use {BIN_NAME}` to your `rc.elv`"),
        Shell::PowerShell => println!("Now add `. {}` to your $PROFILE script", path.display()),
        Shell::Zsh => {
            if let Some(dir) = path.parent() {
                println!("You may need to add {} to $fpath in your .zshrc", dir.display());
            }
        },
        _ => (),
    }
}

pub fn cmd(args: &Args, mut cmd: clap::Command) -> EmptyResult {
    let (mut out, maybe_path): (Box<dyn Write>, Option<PathBuf>) = if args.stdout {
        (Box::new(io::stdout()), None)
    } else {
        let path = prompt_for_location(&args.shell, &mut io::stdin().lock())?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        (Box::new(File::create(&path)?), Some(path))
    };

    generate(args.shell, &mut cmd, BIN_NAME, &mut out);

    if let Some(path) = maybe_path {
        println!("Completions written to {}", path.display());
        print_extra_info(&args.shell, &path);
        println!("You may need to restart your shell.");
    }

    Ok(())
}
