//! Question-and-answer session that collects a recipe and its costs.
//!
//! Reads answers line by line from any `BufRead` and writes prompts to any
//! `Write`, so the whole conversation can be driven from byte buffers.

use std::io::{self, BufRead, Write};

use recipe_cost_core::{
    is_known_unit, parse_money, parse_positive_quantity, Cost, Ingredient, ModelError, Recipe,
};
use thiserror::Error;

use crate::ordinal::ordinal;

/// Typed in place of an ingredient name to finish the recipe.
const DONE: &str = "done";

const UNIT_HINT: &str = "Try something like cups, tbsp, pounds, ounces, grams or each.";

#[derive(Error, Debug)]
pub enum InterviewError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Input ended before the interview was finished")]
    EndOfInput,

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub struct Interview<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Interview<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, text: &str) -> Result<(), InterviewError> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Print `prompt` without a newline and read one answer.
    fn prompt(&mut self, prompt: &str) -> Result<String, InterviewError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InterviewError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    /// Keep asking until `parse` accepts the answer.
    fn prompt_until<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, String>,
    ) -> Result<(String, T), InterviewError> {
        loop {
            let answer = self.prompt(prompt)?;
            match parse(&answer) {
                Ok(value) => return Ok((answer, value)),
                Err(complaint) => self.say(&complaint)?,
            }
        }
    }

    fn prompt_quantity(&mut self, prompt: &str) -> Result<(String, f64), InterviewError> {
        self.prompt_until(prompt, |answer| {
            parse_positive_quantity(answer).map_err(|e| {
                format!("{}. Enter a number like 3, 2.5 or 1 1/2.", e)
            })
        })
    }

    /// An empty answer means a plain count ("each").
    fn prompt_unit(&mut self, prompt: &str) -> Result<String, InterviewError> {
        let (_, unit) = self.prompt_until(prompt, |answer| {
            if answer.is_empty() {
                Ok("each".to_string())
            } else if is_known_unit(answer) {
                Ok(answer.to_string())
            } else {
                Err(format!("Sorry, I don't know the unit \"{}\". {}", answer, UNIT_HINT))
            }
        })?;
        Ok(unit)
    }

    /// Introduce the calculator and ask for consent. Anything other than an
    /// answer starting with "y" declines.
    pub fn confirm_start(&mut self) -> Result<bool, InterviewError> {
        self.say("This is the recipe calculator.")?;
        self.say("First you will enter the recipe,")?;
        self.say("Then I will ask for the cost of the ingredients.")?;
        self.say("When we are done, I will print the cost of the recipe.")?;

        let answer = self.prompt("Shall we get started? (y/N)")?;
        if answer.to_lowercase().starts_with('y') {
            Ok(true)
        } else {
            self.say("OK. Maybe next time.")?;
            Ok(false)
        }
    }

    /// Collect the recipe name and its ingredients until "done".
    pub fn read_recipe(&mut self) -> Result<Recipe, InterviewError> {
        self.say("Great! Let's get started. For each ingredient,")?;
        self.say("I will ask for the name of it, the quantity,")?;
        self.say("and then the unit of measure. For example,")?;
        self.say("3 cups of flour would be entered like:")?;
        self.say("Ingredient: flour")?;
        self.say("Quantity: 3")?;
        self.say("Unit of measure: cups")?;
        self.say("When you have entered all of the ingredients,")?;
        self.say("just type \"done\" for the ingredient name.")?;

        let name = self.prompt("What shall we call this recipe? ")?;
        let mut recipe = Recipe::new(name);
        self.say("Great!")?;

        loop {
            let position = recipe.ingredients().len() + 1;
            let item = self.prompt(&format!(
                "What's the name of the {} item? (eg: flour): ",
                ordinal(position)
            ))?;
            if item.eq_ignore_ascii_case(DONE) {
                break;
            }
            if item.is_empty() {
                continue;
            }

            let (typed, quantity) = self.prompt_quantity(&format!(
                "Great. Now, what's the quantity (only) of {}? ",
                item
            ))?;
            let measure = self.prompt_unit(&format!(
                "OK, and the unit of measure? We have {} WHATs of {}? ",
                typed, item
            ))?;

            let ingredient = Ingredient::new(quantity, measure, item)?;
            self.say(&format!("Fantastic. I've added {} to the recipe.", ingredient))?;
            recipe.add_ingredient(ingredient);
        }

        self.say("All done. Here's the recipe:")?;
        self.say(&recipe.to_string())?;
        Ok(recipe)
    }

    /// Ask what was paid for each ingredient and how much that bought.
    pub fn add_costs(&mut self, recipe: &mut Recipe) -> Result<(), InterviewError> {
        self.say(&format!("Now that we have the recipe \"{}\"", recipe.name()))?;
        self.say("we need to figure out the costs.")?;
        self.say("For each of the items in the recipe,")?;
        self.say("We'll ask how much you paid for how much of it.")?;
        self.say("For example, if 5 pounds of flour cost $2.19,")?;
        self.say("We'd put 2.19 for the price, 5 for the quantity, and pounds for the unit")?;

        for ingredient in recipe.ingredients_mut() {
            let thing = ingredient.thing().to_string();

            let (_, money) = self.prompt_until(
                &format!("How much did you pay for {}? $", thing),
                |answer| {
                    parse_money(answer)
                        .map_err(|e| format!("{}. Enter a price like 2.19.", e))
                },
            )?;
            let (typed, quantity) = self.prompt_quantity(&format!(
                "And what's the quantity of {} you get for ${:.2}? ",
                thing, money
            ))?;
            let measure = self.prompt_unit(&format!(
                "Finally, you get {} WHATs of {} for ${:.2}? ",
                typed, thing, money
            ))?;

            ingredient.set_cost(Cost::new(money, quantity, measure)?);
        }

        self.say("Great! Now we're done collecting information.")?;
        self.say("Give me a moment to calculate your actual price for this recipe...")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interview(input: &str) -> Interview<&[u8], Vec<u8>> {
        Interview::new(input.as_bytes(), Vec::new())
    }

    fn transcript(interview: Interview<&[u8], Vec<u8>>) -> String {
        String::from_utf8(interview.into_output()).unwrap()
    }

    #[test]
    fn test_consent() {
        for yes in ["y", "Y", "yes", "  Yep "] {
            assert!(interview(&format!("{yes}\n")).confirm_start().unwrap(), "{yes}");
        }
        for no in ["", "n", "no", "sure"] {
            let answer = format!("{no}\n");
            let mut session = interview(&answer);
            assert!(!session.confirm_start().unwrap(), "{no}");
            assert!(transcript(session).ends_with("OK. Maybe next time.\n"));
        }
    }

    #[test]
    fn test_read_recipe() {
        let mut session = interview("Bread\nflour\n3\ncups\neggs\n2\n\nDONE\n");
        let recipe = session.read_recipe().unwrap();

        assert_eq!(recipe.name(), "Bread");
        assert_eq!(recipe.ingredients().len(), 2);
        assert_eq!(recipe.ingredients()[1].measure(), "each");

        let out = transcript(session);
        assert!(out.contains("What's the name of the 1st item? (eg: flour): "));
        assert!(out.contains("What's the name of the 2nd item? (eg: flour): "));
        assert!(out.contains("What's the name of the 3rd item? (eg: flour): "));
        assert!(out.contains("Fantastic. I've added 3 cups of flour. to the recipe."));
        assert!(out.contains("All done. Here's the recipe:\nBread\n3 cups of flour.\n2 each of eggs.\n"));
    }

    #[test]
    fn test_bad_answers_are_asked_again() {
        let mut session = interview("Tea\n\nsugar\nlots\n0\n1 1/2\nheaps\ntsp\ndone\n");
        let recipe = session.read_recipe().unwrap();

        let sugar = &recipe.ingredients()[0];
        assert_eq!(sugar.quantity(), 1.5);
        assert_eq!(sugar.measure(), "tsp");

        let out = transcript(session);
        assert!(out.contains("Not a number or fraction: \"lots\". Enter a number"));
        assert!(out.contains("Quantity must be greater than zero, got 0."));
        assert!(out.contains("Sorry, I don't know the unit \"heaps\"."));
        assert!(out.contains("We have 1 1/2 WHATs of sugar? "));
    }

    #[test]
    fn test_add_costs() {
        let mut recipe = Recipe::new("Bread");
        recipe.add_ingredient(Ingredient::new(3.0, "cups", "flour").unwrap());

        let mut session = interview("$-1\n$2.19\n5\nlbs\n");
        session.add_costs(&mut recipe).unwrap();

        let cost = recipe.ingredients()[0].cost().unwrap();
        assert_eq!(cost.money(), 2.19);
        assert_eq!(cost.quantity(), 5.0);
        assert_eq!(cost.measure(), "lbs");

        let out = transcript(session);
        assert!(out.contains("How much did you pay for flour? $"));
        assert!(out.contains("And what's the quantity of flour you get for $2.19? "));
        assert!(out.contains("Finally, you get 5 WHATs of flour for $2.19? "));
        assert!(out.contains("Great! Now we're done collecting information."));
    }

    #[test]
    fn test_end_of_input() {
        let mut session = interview("Bread\nflour\n");
        assert!(matches!(
            session.read_recipe(),
            Err(InterviewError::EndOfInput)
        ));
        assert!(matches!(
            interview("").confirm_start(),
            Err(InterviewError::EndOfInput)
        ));
    }
}
