/// The fixed command table. Lookup is case-sensitive and the slash is not part of the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Start,
    Help,
    Signup,
    Login,
    Exercises,
    CreateWorkout,
    AddExercise,
    MyWorkouts,
    Stats,
    Logout,
}

impl CommandKind {
    /// Every command, in the order the help text lists them
    pub const ALL: [CommandKind; 10] = [
        CommandKind::Start,
        CommandKind::Help,
        CommandKind::Signup,
        CommandKind::Login,
        CommandKind::Exercises,
        CommandKind::CreateWorkout,
        CommandKind::AddExercise,
        CommandKind::MyWorkouts,
        CommandKind::Stats,
        CommandKind::Logout,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Start => "start",
            CommandKind::Help => "help",
            CommandKind::Signup => "signup",
            CommandKind::Login => "login",
            CommandKind::Exercises => "exercises",
            CommandKind::CreateWorkout => "createworkout",
            CommandKind::AddExercise => "addexercise",
            CommandKind::MyWorkouts => "myworkouts",
            CommandKind::Stats => "stats",
            CommandKind::Logout => "logout",
        }
    }

    pub fn usage(&self) -> &'static str {
        match self {
            CommandKind::Start => "/start",
            CommandKind::Help => "/help",
            CommandKind::Signup => "/signup username password",
            CommandKind::Login => "/login username password",
            CommandKind::Exercises => "/exercises",
            CommandKind::CreateWorkout => "/createworkout title",
            CommandKind::AddExercise => "/addexercise workout_id exercise_id sets reps weight",
            CommandKind::MyWorkouts => "/myworkouts",
            CommandKind::Stats => "/stats",
            CommandKind::Logout => "/logout",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CommandKind::Start => "Show available commands",
            CommandKind::Help => "Show available commands",
            CommandKind::Signup => "Register and receive a token",
            CommandKind::Login => "Log in and receive a token",
            CommandKind::Exercises => "List the exercise catalog",
            CommandKind::CreateWorkout => "Start a new workout",
            CommandKind::AddExercise => "Log sets, reps and weight in a workout",
            CommandKind::MyWorkouts => "List workouts and their entries",
            CommandKind::Stats => "Show workout totals",
            CommandKind::Logout => "Forget your token",
        }
    }

    /// Minimum number of arguments after the command name
    pub fn min_args(&self) -> usize {
        match self {
            CommandKind::Signup | CommandKind::Login => 2,
            CommandKind::CreateWorkout => 1,
            CommandKind::AddExercise => 5,
            _ => 0,
        }
    }
}
