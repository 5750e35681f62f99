/// A single ingredient of a [`Recipe`].
///
/// All three fields are kept as text. In particular the amount is never
/// coerced to a number, so fractions ("1/2") and ranges ("2-3") survive a
/// round trip through the file format untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    amount: String,
    measure: String,
    name: String,
}

impl Ingredient {
    /// Construct an ingredient from its three positional fields.
    pub fn new(
        amount: impl Into<String>,
        measure: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            measure: measure.into(),
            name: name.into(),
        }
    }

    /// The quantity of the ingredient, as written in the file.
    #[must_use]
    pub fn amount(&self) -> &str {
        &self.amount
    }

    /// The unit of measure, for example "dl" or "st".
    #[must_use]
    pub fn measure(&self) -> &str {
        &self.measure
    }

    /// The name of the ingredient.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A recipe: a name, its ingredients, and its preparation steps.
///
/// Ingredients and instructions keep their insertion order, which is the
/// order they appear in the backing file. Equality is structural over all
/// fields; two recipes with the same name but different contents compare
/// unequal, and duplicate names are permitted in a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    name: String,
    ingredients: Vec<Ingredient>,
    instructions: Vec<String>,
}

impl Recipe {
    /// Construct an empty recipe with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
        }
    }

    /// The name of the recipe.
    ///
    /// Doubles as the display title and the sort key of the collection.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ingredients, in file order.
    #[must_use]
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// The preparation steps, in file order.
    #[must_use]
    pub fn instructions(&self) -> &[String] {
        &self.instructions
    }

    /// Append an ingredient.
    pub fn add_ingredient(&mut self, ingredient: Ingredient) {
        self.ingredients.push(ingredient);
    }

    /// Append a preparation step.
    pub fn add_instruction(&mut self, instruction: impl Into<String>) {
        self.instructions.push(instruction.into());
    }
}

#[cfg(test)]
mod tests {
    use super::{Ingredient, Recipe};

    #[test]
    fn insertion_order_is_preserved() {
        let mut recipe = Recipe::new("Pancakes");
        recipe.add_ingredient(Ingredient::new("2", "dl", "flour"));
        recipe.add_ingredient(Ingredient::new("3", "st", "egg"));
        recipe.add_instruction("Mix");
        recipe.add_instruction("Fry");

        assert_eq!(recipe.ingredients()[0].name(), "flour");
        assert_eq!(recipe.ingredients()[1].name(), "egg");
        assert_eq!(recipe.instructions(), ["Mix", "Fry"]);
    }

    #[test]
    fn equality_is_structural() {
        let mut a = Recipe::new("Soup");
        a.add_instruction("Boil");
        let b = a.clone();

        assert_eq!(a, b);
    }

    #[test]
    fn same_name_different_contents_are_unequal() {
        let mut a = Recipe::new("Soup");
        a.add_instruction("Boil");
        let mut b = Recipe::new("Soup");
        b.add_instruction("Simmer");

        assert_ne!(a, b);
    }

    #[test]
    fn amount_is_not_coerced() {
        let ingredient = Ingredient::new("1/2", "tsk", "salt");
        assert_eq!(ingredient.amount(), "1/2");
    }
}
