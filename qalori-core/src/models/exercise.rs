use std::fmt;

/// An activity the user can pick when logging a workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exercise {
    pub name: &'static str,
    /// Metabolic equivalent of task.
    pub met: f64,
}

/// Exercises offered by the workout tracker. "None" clears the day's workouts.
pub const EXERCISES: &[Exercise] = &[
    Exercise { name: "None", met: 0.0 },
    Exercise { name: "Walking", met: 3.5 },
    Exercise { name: "Running", met: 9.8 },
    Exercise { name: "Cycling", met: 7.5 },
    Exercise { name: "Swimming", met: 8.0 },
    Exercise { name: "Strength Training", met: 5.0 },
    Exercise { name: "Yoga", met: 2.5 },
    Exercise { name: "Dance", met: 5.0 },
    Exercise { name: "Hiking", met: 6.0 },
    Exercise { name: "Basketball", met: 6.5 },
    Exercise { name: "Soccer", met: 7.0 },
    Exercise { name: "Volleyball", met: 4.0 },
    Exercise { name: "Tennis", met: 7.3 },
    Exercise { name: "Other", met: 4.0 },
];

impl Exercise {
    /// Looks up an exercise by name, ignoring case and separators.
    pub fn find(name: &str) -> Option<&'static Exercise> {
        let wanted = squash(name);
        EXERCISES.iter().find(|e| squash(e.name) == wanted)
    }

    pub fn is_none(&self) -> bool {
        self.met == 0.0
    }
}

fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (MET {})", self.name, self.met)
    }
}
