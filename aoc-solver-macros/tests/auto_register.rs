use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError,
    SolverPlugin, SolverRegistryBuilder,
};

fn numbers(input: &str) -> Result<Vec<i64>, ParseError> {
    input
        .split_whitespace()
        .map(|t| {
            t.parse()
                .map_err(|_| ParseError::InvalidFormat(format!("bad number {t:?}")))
        })
        .collect()
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 24, tags = ["test", "sum"])]
struct Tagged;

impl AocParser for Tagged {
    type SharedData<'a> = Vec<i64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        numbers(input)
    }
}

impl PartSolver<1> for Tagged {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i64>().to_string())
    }
}

impl PartSolver<2> for Tagged {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().product::<i64>().to_string())
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2019, day = 25)]
struct Untagged;

impl AocParser for Untagged {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input)
    }
}

impl PartSolver<1> for Untagged {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.chars().rev().collect())
    }
}

fn plugin(year: u16, day: u8) -> Option<&'static SolverPlugin> {
    aoc_solver::inventory::iter::<SolverPlugin>()
        .find(|p| p.year == year && p.day == day)
}

#[test]
fn plugins_carry_year_day_and_tags() {
    let tagged = plugin(2019, 24).expect("tagged plugin submitted");
    assert_eq!(tagged.tags, &["test", "sum"]);
    assert_eq!(tagged.solver.parts(), 2);

    let untagged = plugin(2019, 25).expect("untagged plugin submitted");
    assert!(untagged.tags.is_empty());
    assert_eq!(untagged.solver.parts(), 1);
}

#[test]
fn registered_plugins_solve_through_the_registry() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|p| p.year == 2019)
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2019, 24, "2 3 7").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "12");
    assert_eq!(solver.solve(2).unwrap().answer, "42");

    let mut solver = registry.create_solver(2019, 25, "abc").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "cba");
}

#[test]
fn tag_filter_selects_subset() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|p| p.tags.contains(&"sum"))
        .unwrap()
        .build();

    assert!(registry.storage().contains(2019, 24));
    assert!(!registry.storage().contains(2019, 25));
    assert_eq!(registry.storage().len(), 1);
}
