//! Text Renderer
//!
//! Draws a `WorldSnapshot` as a character grid followed by an info panel for
//! the first few agents.
//!
//! Grid cells read `A<id>` for an agent, `<amount>F` for uneaten food and
//! `**` for an empty cell. An agent standing on food hides it.

use std::fmt;

use temperance_events::{AgentSnapshot, Cell, WorldSnapshot};

use crate::components::Rule;

/// Grid plus agent panel, ready to print
pub struct WorldView<'a> {
    snapshot: &'a WorldSnapshot,
    shown_agents: usize,
}

impl<'a> WorldView<'a> {
    pub fn new(snapshot: &'a WorldSnapshot, shown_agents: usize) -> Self {
        Self {
            snapshot,
            shown_agents,
        }
    }
}

impl fmt::Display for WorldView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, self.snapshot)?;
        for agent in self.snapshot.agents.iter().take(self.shown_agents) {
            write_agent_panel(f, self.snapshot, agent)?;
        }
        Ok(())
    }
}

/// Render the whole view to a string.
pub fn render(snapshot: &WorldSnapshot, shown_agents: usize) -> String {
    WorldView::new(snapshot, shown_agents).to_string()
}

fn write_grid(f: &mut fmt::Formatter<'_>, snapshot: &WorldSnapshot) -> fmt::Result {
    let size = snapshot.grid_size as i32;

    write!(f, "   ")?;
    for x in 0..size {
        write!(f, "{x}] ")?;
    }
    writeln!(f)?;

    for y in 0..size {
        write!(f, "{y}] ")?;
        for x in 0..size {
            let cell = Cell::new(x, y);
            if let Some(agent) = snapshot.agent_at(cell) {
                write!(f, "A{} ", agent.agent_id)?;
            } else if let Some(food) = snapshot.available_food_at(cell) {
                write!(f, "{}F ", food.amount)?;
            } else {
                write!(f, "** ")?;
            }
        }
        writeln!(f)?;
        writeln!(f)?;
    }
    Ok(())
}

fn write_agent_panel(
    f: &mut fmt::Formatter<'_>,
    snapshot: &WorldSnapshot,
    agent: &AgentSnapshot,
) -> fmt::Result {
    write!(
        f,
        "Agent {} at {},{}. Health: {:.1}.",
        agent.agent_id, agent.position.x, agent.position.y, agent.health
    )?;
    if let Some(food) = agent.pursuing.and_then(|id| snapshot.find_food(id)) {
        write!(
            f,
            " Pursuing food at ({},{}) with amount {}.",
            food.position.x, food.position.y, food.amount
        )?;
    } else if let Some(food) = agent.consuming.and_then(|id| snapshot.find_food(id)) {
        write!(
            f,
            " Consuming food at ({},{}) with amount {}.",
            food.position.x, food.position.y, food.amount
        )?;
        if food.amount == 3 {
            write!(f, " Got sick!")?;
        }
        if agent.punished {
            write!(f, " Punished by others!")?;
        }
    }
    writeln!(f)?;

    write!(f, "Knowledge:")?;
    for (i, weight) in agent.rule_weights.iter().enumerate() {
        let sep = if i == 0 { " " } else { " || " };
        write!(f, "{sep}Rule{}: {weight}", i + 1)?;
    }
    writeln!(f)?;

    writeln!(
        f,
        "Social pressure: {:.1} || Times punished for 2: {} || Times punished for 3: {} || Times sick 3: {}",
        agent.social_pressure, agent.times_punished_2, agent.times_punished_3, agent.times_sick_3
    )?;

    for seen in &agent.seeing {
        writeln!(
            f,
            "Seeing food at ({},{}) with amount {}. Decision: P:{} E:{} C:{} S:{:.1} Total Score: {:.1}.",
            seen.position.x,
            seen.position.y,
            seen.amount,
            seen.physical,
            seen.emotional,
            seen.cognitive,
            seen.social,
            seen.total
        )?;
    }
    Ok(())
}

/// One line per rule: `Rule<n>: <proposition>`
pub fn render_rule_legend() -> String {
    Rule::ALL
        .iter()
        .map(|rule| format!("Rule{}: {}\n", rule.index() + 1, rule.text()))
        .collect()
}
