// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Prompt construction for plan generation and food analysis.

use crate::models::meal::MealType;
use crate::models::{MealPreference, WorkoutPreference};
use std::fmt::Write;

/// Meal plans always cover one week.
pub const MEAL_PLAN_DAYS: u32 = 7;

/// Exercises the workout model may choose from. Names match the image catalog.
pub const EXERCISE_CATALOG: &[&str] = &[
    "Push-ups",
    "Squats",
    "Lunges",
    "Plank",
    "Burpees",
    "Deadlifts",
    "Bench Press",
    "Pull-ups",
    "Overhead Press",
    "Rows",
    "Bicep Curls",
    "Tricep Dips",
    "Leg Press",
    "Calf Raises",
    "Lat Pulldowns",
    "Hammer Curls",
    "Shoulder Shrugs",
    "Leg Curls",
    "Chest Flyes",
    "Front Squats",
    "Glute Bridges",
    "Tricep Extensions",
    "Hanging Leg Raises",
    "Side Planks",
    "Russian Twists",
    "Mountain Climbers",
    "Jumping Jacks",
    "High Knees",
    "Box Jumps",
    "Battle Ropes",
    "Kettlebell Swings",
    "Goblet Squats",
    "Step-ups",
    "Walking Lunges",
    "Split Squats",
    "Bulgarian Split Squats",
    "Calf Raise Variations",
    "Hamstring Curls",
    "Leg Extensions",
    "Hip Thrusts",
    "Glute Kickbacks",
    "Donkey Kicks",
    "Fire Hydrants",
    "Reverse Crunches",
    "Bicycle Crunches",
    "Leg Raises",
    "Flutter Kicks",
    "Scissor Kicks",
    "Reverse Plank",
    "Side Crunches",
    "Oblique Crunches",
    "Hanging Knee Raises",
    "Toe Touches",
    "Reverse Hyperextensions",
    "Good Mornings",
    "Hip Circles",
    "Hip Flexor Stretch",
    "Hamstring Stretch",
    "Quad Stretch",
    "Chest Stretch",
    "Shoulder Stretch",
    "Tricep Stretch",
    "Bicep Stretch",
    "Forearm Stretch",
    "Wrist Stretch",
    "Neck Stretch",
    "Cat-Cow Stretch",
    "Downward Dog",
    "Upward Dog",
    "Cobra Stretch",
    "Child's Pose",
    "Pigeon Pose",
    "Warrior Pose",
    "Triangle Pose",
    "Tree Pose",
    "Eagle Pose",
    "Chair Pose",
    "Bridge Pose",
    "Wheel Pose",
    "Fish Pose",
    "Boat Pose",
    "Crow Pose",
    "Headstand",
    "Handstand",
    "Forearm Stand",
    "Side Plank Variations",
    "Reverse Flyes",
    "Face Pulls",
    "Rear Delt Flyes",
    "Front Raises",
    "Lateral Raises",
    "Shrugs",
    "Upright Rows",
    "Close-Grip Bench Press",
    "Incline Bench Press",
    "Decline Bench Press",
    "Floor Press",
    "Dumbbell Flyes",
    "Cable Flyes",
    "Pushdowns",
    "Skull Crushers",
    "Overhead Extensions",
    "Dips",
    "Close-Grip Push-ups",
    "Concentration Curls",
    "Preacher Curls",
    "Drag Curls",
    "Zottman Curls",
    "Barbell Curls",
    "EZ Bar Curls",
    "Resistance Band Curls",
    "Cable Curls",
    "Incline Curls",
    "Decline Curls",
    "Hammer Strength Curls",
    "Seated Curls",
    "Standing Curls",
    "Kneeling Curls",
    "Lying Curls",
];

const WORKOUT_OUTPUT_TEMPLATE: &str = r#"{
  "weeks": [
    {
      "week": 1,
      "days": [
        {
          "day": 1,
          "exercises": [
            {
              "name": "Exercise Name",
              "instructions": "Step-by-step instructions on how to perform the exercise correctly.",
              "description": "Brief description of the exercise and its benefits.",
              "sets": 3,
              "reps": 12,
              "time": "30 sec",
              "restTime": "45 sec",
              "image": "",
              "equipment": ["Dumbbells"],
              "muscleGroup": ["Chest", "Triceps"],
              "caloriesBurned": 100
            }
          ],
          "status": "pending"
        }
      ],
      "status": "pending"
    }
  ]
}"#;

const MEAL_OUTPUT_TEMPLATE: &str = r#"{
  "days": [
    {
      "day": 1,
      "meals": [
        {
          "type": "Meal Type",
          "name": "Meal Name",
          "description": "Short description of the meal",
          "nutritionalValues": {
            "protein": 30,
            "carbs": 45,
            "fats": 12,
            "calories": 420
          }
        }
      ],
      "totalCalories": 2000,
      "totalProtein": 150,
      "totalCarbs": 220,
      "totalFats": 60
    }
  ]
}"#;

const FOOD_OUTPUT_TEMPLATE: &str = r#"{
  "food_identification": [
    { "item": "Food name", "estimated_weight": "Estimated weight in grams" }
  ],
  "nutritional_information": {
    "calories": "Total calories for the portion",
    "protein": "Total protein for the portion",
    "carbohydrates": "Total carbohydrates for the portion",
    "fats": "Total fats for the portion"
  },
  "recipe": {
    "name": "Recipe Name",
    "ingredients": [ { "name": "Ingredient name", "quantity": "Amount needed" } ],
    "instructions": ["Step 1: ...", "Step 2: ..."],
    "prep_time": "Estimated preparation time",
    "cook_time": "Estimated cooking time",
    "servings": "Number of servings"
  }
}"#;

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

fn text_or_none(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        "None"
    } else {
        trimmed
    }
}

/// Build the workout plan prompt.
pub fn workout_prompt(pref: &WorkoutPreference) -> String {
    let health = join_or_none(&pref.health_considerations);
    let mut prompt = String::with_capacity(6 * 1024);

    // Writing to a String cannot fail.
    let _ = writeln!(
        prompt,
        "Generate a complete, structured workout plan with {} training days per week for {} weeks.",
        pref.weekly_frequency, pref.program_duration
    );
    prompt.push_str(
        "\n### Requirements\n\
         - Include every training day of every week in the response.\n\
         - Choose exercises ONLY from the exercise list below, using the exact names.\n\
         - Match the user's fitness level, training goal and available equipment.\n\
         - Return the whole plan in one response; do not truncate.\n\
         - Keep descriptions concise so the plan fits in the response.\n\
         - Respect the intensity level and health considerations.\n\
         - Schedule no rest days if the user asked for none.\n\
         - Fit each session to the session length and equipment.\n\
         - Estimate the calories burned for each exercise as a number.\n",
    );

    let _ = write!(
        prompt,
        "\n### User Inputs\n\
         - Training Goal: {goal}\n\
         - Training Type: {event}\n\
         - Body Metrics: Height: {height} cm, Weight: {weight} kg\n\
         - Program Duration: {weeks} weeks\n\
         - Equipment Available: {equipment}\n\
         - Session Length: {session} minutes\n\
         - Weekly Frequency: {frequency} days per week\n\
         - No Rest Days: {no_rest}\n\
         - Intensity Level: {intensity}\n\
         - Health Considerations: {health}\n\
         - Additional Details: {details}\n",
        goal = pref.goal.as_str(),
        event = text_or_none(&pref.event_name),
        height = pref.body_metrics.height,
        weight = pref.body_metrics.weight,
        weeks = pref.program_duration,
        equipment = join_or_none(&pref.equipment),
        session = pref.session_length,
        frequency = pref.weekly_frequency,
        no_rest = if pref.no_rest_days { "Yes" } else { "No" },
        intensity = pref.intensity_level.as_str(),
        health = health,
        details = text_or_none(&pref.additional_details),
    );

    prompt.push_str("\n### Exercise List (select from these only)\n");
    for exercise in EXERCISE_CATALOG {
        let _ = writeln!(prompt, "- {}", exercise);
    }

    let _ = write!(
        prompt,
        "\n### Output Format\n\
         Return valid JSON covering ALL weeks and days, with this structure:\n\n\
         ```json\n{}\n```\n",
        WORKOUT_OUTPUT_TEMPLATE
    );

    prompt
}

/// Build the meal plan prompt.
pub fn meal_prompt(pref: &MealPreference) -> String {
    let mut prompt = String::with_capacity(4 * 1024);

    let _ = writeln!(
        prompt,
        "Generate a complete, structured meal prep plan for {} days based on the user's inputs. \
         The plan must support the user's fitness and health goals and respect their \
         meal preferences, dietary restrictions and allergies.",
        MEAL_PLAN_DAYS
    );
    prompt.push_str(
        "\n### Requirements\n\
         - Every meal must respect the dietary restrictions and allergies.\n\
         - Support the goal (e.g. high protein for muscle gain, calorie deficit for weight loss).\n\
         - Return only valid JSON with no additional text.\n\
         - Return the whole plan in one response; do not truncate.\n\
         - Keep descriptions concise so the plan fits in the response.\n\
         - Give protein, carbs, fats, calories, totalCalories, totalProtein, totalCarbs and \
           totalFats as plain numbers, not words.\n",
    );

    let _ = write!(
        prompt,
        "\n### User Inputs\n\
         - Caloric Intake Goal: {calories}\n\
         - Meal Count Preference: {count}\n\
         - Dietary Restrictions: {restrictions}\n\
         - Allergies: {allergies}\n\
         - Goal: {goal}\n\
         - BMI: {bmi}\n\
         - Height: {height} cm\n\
         - Weight: {weight} kg\n\
         - Age: {age} years\n",
        calories = pref.caloric_intake_goal,
        count = pref.meal_count_preference.as_str(),
        restrictions = pref
            .restrictions_text()
            .unwrap_or_else(|| "None".to_string()),
        allergies = text_or_none(&pref.allergies),
        goal = pref.goal,
        bmi = pref.bmi,
        height = pref.height,
        weight = pref.weight,
        age = pref.age,
    );

    prompt.push_str(
        "\n### Meal Types\nChoose meals according to the meal count preference from this list:\n",
    );
    for meal_type in MealType::ALL {
        let _ = writeln!(prompt, "- {}", meal_type.as_str());
    }

    let _ = write!(
        prompt,
        "\n### Output Format\n\
         Return the meal plan as JSON with this structure:\n\n\
         ```json\n{}\n```\n\n\
         ### Guidelines\n\
         - Cover all {} days.\n\
         - Make sure every bracket is matched so the JSON is valid.\n",
        MEAL_OUTPUT_TEMPLATE, MEAL_PLAN_DAYS
    );

    prompt
}

/// Build the food image analysis prompt.
pub fn food_analysis_prompt(portion: Option<&str>) -> String {
    let portion = portion
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or("Not provided");

    format!(
        "Analyze the provided image and identify all food items present. \
         Use the portion information, if provided, to calculate the total macros.\n\n\
         - If the image does not contain food, return: {{\"food\": \"None\"}}\n\
         - If food is detected, return a JSON object with this structure:\n\
         {template}\n\n\
         Ensure that:\n\
         - Each identified food has an accurate name and estimated weight.\n\
         - The ingredients include the key components of the dish.\n\
         - The nutritional information accounts for the portion information.\n\
         - The recipe gives clear step-by-step cooking instructions.\n\
         - You return only valid JSON with no extra text.\n\n\
         Portion information: {portion}",
        template = FOOD_OUTPUT_TEMPLATE,
        portion = portion,
    )
}
