//! Built-in sample catalog used to seed an empty store.

use crate::domain::{
    Cuisine, NewRecipe, PLACEHOLDER_IMAGE_URL, RecipeContent, SYSTEM_OWNER_ID, StoredImage,
};

/// A catalog entry inserted by `RecipeService::seed_if_empty`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRecipe {
    pub content: RecipeContent,
    /// Externally hosted image; never asset-managed.
    pub image_url: String,
}

impl SampleRecipe {
    /// The insert payload: owned by the system account, hosted image only.
    pub fn to_new_recipe(&self) -> NewRecipe {
        NewRecipe {
            content: self.content.clone(),
            image: StoredImage::hosted(self.image_url.clone()),
            owner_id: SYSTEM_OWNER_ID.to_string(),
        }
    }
}

struct Entry {
    title: &'static str,
    cuisine: Cuisine,
    hint: &'static str,
    ingredients: &'static [&'static str],
    instructions: &'static [&'static str],
}

const CATALOG: &[Entry] = &[
    Entry {
        title: "Margherita Pizza",
        cuisine: Cuisine::Italian,
        hint: "margherita pizza",
        ingredients: &[
            "Pizza Dough",
            "1 cup Tomato Sauce",
            "200g Fresh Mozzarella",
            "Fresh Basil Leaves",
            "Olive Oil",
            "Salt",
        ],
        instructions: &[
            "Preheat oven to 475°F (245°C).",
            "Roll out pizza dough on a floured surface.",
            "Spread tomato sauce evenly over the dough.",
            "Tear mozzarella into small pieces and distribute over the sauce.",
            "Bake for 10-12 minutes, or until the crust is golden and cheese is bubbly.",
            "Top with fresh basil leaves, a drizzle of olive oil, and a pinch of salt before serving.",
        ],
    },
    Entry {
        title: "Pad Thai",
        cuisine: Cuisine::Thai,
        hint: "pad thai",
        ingredients: &[
            "200g Rice Noodles",
            "150g Shrimp or Tofu",
            "2 Eggs",
            "1 cup Bean Sprouts",
            "1/4 cup Crushed Peanuts",
            "3 tbsp Tamarind Paste",
            "2 tbsp Fish Sauce",
            "1 tbsp Sugar",
            "Lime Wedges",
        ],
        instructions: &[
            "Soak rice noodles in warm water until soft, then drain.",
            "In a wok, scramble eggs and set aside.",
            "Sauté shrimp or tofu until cooked.",
            "Add noodles, tamarind paste, fish sauce, and sugar. Stir-fry for 2-3 minutes.",
            "Add bean sprouts and scrambled eggs. Toss to combine.",
            "Serve topped with crushed peanuts and a lime wedge.",
        ],
    },
    Entry {
        title: "Classic Beef Stew",
        cuisine: Cuisine::American,
        hint: "beef stew",
        ingredients: &[
            "1kg Beef Chuck, cubed",
            "2 tbsp Olive Oil",
            "2 Onions",
            "4 Carrots",
            "4 Potatoes",
            "1 liter Beef Broth",
            "2 tbsp Tomato Paste",
            "1 tsp Thyme",
        ],
        instructions: &[
            "In a large pot, heat olive oil and brown the beef cubes in batches. Remove and set aside.",
            "Sauté onions until softened.",
            "Stir in tomato paste and cook for 1 minute.",
            "Return beef to the pot. Add beef broth and thyme. Bring to a simmer.",
            "Cover and cook on low for 2 hours.",
            "Add carrots and potatoes, and cook for another hour until beef and vegetables are tender.",
        ],
    },
    Entry {
        title: "Miso Soup",
        cuisine: Cuisine::Japanese,
        hint: "miso soup",
        ingredients: &[
            "4 cups Dashi (Japanese soup stock)",
            "3-4 tbsp Miso Paste",
            "200g Silken Tofu, cubed",
            "1 tbsp Dried Wakame Seaweed",
            "2 Scallions, chopped",
        ],
        instructions: &[
            "Rehydrate wakame in a little water, then drain.",
            "In a pot, bring the dashi to a simmer. Do not boil.",
            "In a small bowl, whisk the miso paste with a little hot dashi until smooth. Stir it into the pot.",
            "Add tofu and wakame. Heat through gently for a minute.",
            "Serve immediately, garnished with chopped scallions.",
        ],
    },
    Entry {
        title: "Chicken Fajitas",
        cuisine: Cuisine::Mexican,
        hint: "chicken fajitas",
        ingredients: &[
            "500g Chicken Breast, sliced",
            "1 Onion, sliced",
            "2 Bell Peppers, sliced",
            "1 packet Fajita Seasoning",
            "8 Flour Tortillas",
            "Sour Cream",
            "Salsa",
            "Guacamole",
        ],
        instructions: &[
            "In a large skillet, cook chicken slices with fajita seasoning until browned.",
            "Add sliced onion and bell peppers. Cook until tender-crisp.",
            "Warm tortillas in a dry skillet or microwave.",
            "Serve the chicken and vegetable mixture with warm tortillas and your favorite toppings like sour cream, salsa, and guacamole.",
        ],
    },
    Entry {
        title: "Sweet and Sour Pork",
        cuisine: Cuisine::Chinese,
        hint: "sweet sour",
        ingredients: &[
            "500g Pork, cubed",
            "1 cup Pineapple Chunks",
            "1 Green Bell Pepper, chopped",
            "For sauce: 1/2 cup Vinegar",
            "1/2 cup Sugar",
            "2 tbsp Soy Sauce",
            "1 tbsp Ketchup",
        ],
        instructions: &[
            "Coat pork cubes in cornstarch and deep-fry until golden. Drain and set aside.",
            "In a separate pan, combine vinegar, sugar, soy sauce, and ketchup for the sauce. Bring to a simmer.",
            "Add bell pepper and pineapple chunks to the sauce, cooking for a few minutes.",
            "Stir in the fried pork, ensuring it's well-coated with the sauce.",
            "Serve immediately with steamed rice.",
        ],
    },
    Entry {
        title: "Butter Chicken (Murgh Makhani)",
        cuisine: Cuisine::Indian,
        hint: "butter chicken",
        ingredients: &[
            "500g Chicken, cubed",
            "1 cup Tomato Puree",
            "1/2 cup Heavy Cream",
            "1/4 cup Butter",
            "1 tbsp Ginger-Garlic Paste",
            "1 tsp Garam Masala",
            "1 tsp Kasuri Methi (dried fenugreek)",
        ],
        instructions: &[
            "Marinate chicken with ginger-garlic paste and salt.",
            "In a pan, melt butter and cook the tomato puree until it thickens.",
            "Add garam masala and cook for a minute.",
            "Stir in the heavy cream and kasuri methi.",
            "Add the chicken and simmer until cooked through and the sauce is creamy.",
            "Serve hot with naan or rice.",
        ],
    },
    Entry {
        title: "Quiche Lorraine",
        cuisine: Cuisine::French,
        hint: "quiche lorraine",
        ingredients: &[
            "1 unbaked 9-inch Pie Crust",
            "200g Bacon, cooked and crumbled",
            "150g Gruyère Cheese, shredded",
            "3 large Eggs",
            "1 1/2 cups Heavy Cream",
            "Pinch of Nutmeg",
            "Salt and Pepper",
        ],
        instructions: &[
            "Preheat oven to 375°F (190°C).",
            "Sprinkle crumbled bacon and shredded cheese into the bottom of the pie crust.",
            "In a bowl, whisk together eggs and heavy cream.",
            "Season with salt, pepper, and a pinch of nutmeg.",
            "Carefully pour the egg mixture over the bacon and cheese.",
            "Bake for 35-40 minutes, or until the center is set.",
            "Let it cool slightly before slicing.",
        ],
    },
    Entry {
        title: "Authentic Greek Salad",
        cuisine: Cuisine::Other,
        hint: "greek salad",
        ingredients: &[
            "2 large Tomatoes, chopped",
            "1 Cucumber, chopped",
            "1 Red Onion, thinly sliced",
            "1/2 cup Kalamata Olives",
            "200g Feta Cheese, crumbled",
            "4 tbsp Olive Oil",
            "2 tbsp Red Wine Vinegar",
            "1 tsp Dried Oregano",
        ],
        instructions: &[
            "In a large bowl, combine chopped tomatoes, cucumber, and red onion.",
            "Add Kalamata olives and gently toss.",
            "In a small bowl, whisk together olive oil, red wine vinegar, and oregano. Season with salt and pepper.",
            "Pour the dressing over the vegetables and toss to combine.",
            "Top with crumbled feta cheese before serving.",
        ],
    },
    Entry {
        title: "Classic Apple Pie",
        cuisine: Cuisine::American,
        hint: "apple pie",
        ingredients: &[
            "1 double-crust Pie Dough",
            "6-8 Apples, peeled and sliced",
            "3/4 cup Sugar",
            "2 tbsp All-Purpose Flour",
            "1 tsp Cinnamon",
            "1/4 tsp Nutmeg",
            "2 tbsp Butter",
        ],
        instructions: &[
            "Preheat oven to 425°F (220°C).",
            "Line a 9-inch pie plate with one half of the pie dough.",
            "In a large bowl, toss sliced apples with sugar, flour, cinnamon, and nutmeg.",
            "Pour the apple mixture into the pie crust and dot with butter.",
            "Place the second crust on top, trim and crimp the edges, and cut slits for steam to escape.",
            "Bake for 40-50 minutes, or until the crust is golden brown and the filling is bubbly.",
        ],
    },
];

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| (*line).to_string()).collect()
}

/// The ten-recipe sample catalog.
pub fn sample_recipes() -> Vec<SampleRecipe> {
    CATALOG
        .iter()
        .map(|entry| SampleRecipe {
            content: RecipeContent {
                title: entry.title.to_string(),
                cuisine: entry.cuisine,
                ingredients: owned(entry.ingredients),
                instructions: owned(entry.instructions),
                image_hint: entry.hint.to_string(),
            },
            image_url: PLACEHOLDER_IMAGE_URL.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_ten_distinct_titles() {
        let samples = sample_recipes();
        assert_eq!(samples.len(), 10);

        let titles: HashSet<_> = samples.iter().map(|s| s.content.title.as_str()).collect();
        assert_eq!(titles.len(), 10);
        assert!(titles.contains("Pad Thai"));
    }

    #[test]
    fn test_every_sample_is_complete() {
        for sample in sample_recipes() {
            assert!(!sample.content.ingredients.is_empty(), "{}", sample.content.title);
            assert!(!sample.content.instructions.is_empty(), "{}", sample.content.title);
            assert!(!sample.content.image_hint.is_empty());
        }
    }

    #[test]
    fn test_new_recipe_is_system_owned_and_unmanaged() {
        let sample = &sample_recipes()[0];
        let new_recipe = sample.to_new_recipe();
        assert_eq!(new_recipe.owner_id, SYSTEM_OWNER_ID);
        assert_eq!(new_recipe.image.url.as_deref(), Some(PLACEHOLDER_IMAGE_URL));
        assert!(new_recipe.image.storage_path.is_none());
    }
}
