use super::display_header;
use crate::core::{GuideView, Session, StepSequencer};
use crate::errors::Result;
use colored::*;
use dialoguer::{theme::ColorfulTheme, Select};
use tracing::info;

#[derive(Clone, Copy)]
enum Choice {
    Next,
    Previous,
    DoIt,
    Done,
    Close,
}

/// Walks the user through the task held by `sequencer` until they finish or close
pub fn run_guide(session: &Session, sequencer: &mut StepSequencer) -> Result<()> {
    loop {
        render(&sequencer.view());

        let choices = choices_for(&sequencer.view());
        let labels: Vec<&str> = choices.iter().map(|(_, label)| *label).collect();
        let picked = Select::with_theme(&ColorfulTheme::default())
            .items(&labels)
            .default(0)
            .interact()?;

        match choices[picked].0 {
            Choice::Next => {
                sequencer.next();
            }
            Choice::Previous => {
                sequencer.prev();
            }
            Choice::DoIt => {
                sequencer.execute_current(session.agent());
            }
            Choice::Done => {
                info!("Guide '{}' completed", sequencer.task().title);
                println!("{}", "✅ All steps done.".green().bold());
                return Ok(());
            }
            Choice::Close => return Ok(()),
        }
    }
}

fn choices_for(view: &GuideView<'_>) -> Vec<(Choice, &'static str)> {
    let mut choices = Vec::with_capacity(4);
    if view.is_last {
        choices.push((Choice::Done, "Done"));
    } else {
        choices.push((Choice::Next, "Next ▶"));
    }
    if !view.is_first {
        choices.push((Choice::Previous, "◀ Previous"));
    }
    choices.push((Choice::DoIt, "Do it for me"));
    choices.push((Choice::Close, "✕ Close"));
    choices
}

fn render(view: &GuideView<'_>) {
    display_header(view.title);
    println!(
        "{}  • source: {}\n",
        view.description.dimmed(),
        view.source.to_string().cyan()
    );
    println!(
        "{}",
        format!("Step {}/{}", view.position, view.total).bold()
    );
    println!("{}\n", view.instruction.white().bold());

    if let Some(target) = view.target {
        println!("{} {}", "🎯 Go here:".yellow().bold(), target);
    }
    if let Some(status) = view.status {
        println!("{} {}", "Agent:".green().bold(), status.green());
    }
    println!();
}
