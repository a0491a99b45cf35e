use aoc_solver::{
    register_solver, AocParser, DynSolver, ParseError, RegistrationError, SolveError, Solver,
    SolverError, SolverRegistryBuilder,
};

struct Lines;

impl AocParser for Lines {
    type SharedData<'a> = Vec<&'a str>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        if input.trim().is_empty() {
            return Err(ParseError::MissingData("empty input".into()));
        }
        Ok(input.lines().collect())
    }
}

impl Solver for Lines {
    const PARTS: u8 = 2;

    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
        match part {
            1 => Ok(shared.len().to_string()),
            2 => Ok(shared.last().copied().unwrap_or_default().to_string()),
            _ => Err(SolveError::PartNotImplemented(part)),
        }
    }
}

#[test]
fn create_solver_parses_once_and_solves_each_part() {
    let registry = SolverRegistryBuilder::new()
        .register::<Lines>(2023, 5)
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2023, 5, "a\nb\nc").unwrap();
    assert_eq!(solver.year(), 2023);
    assert_eq!(solver.day(), 5);
    assert_eq!(solver.parts(), 2);
    assert!(solver.parse_end() >= solver.parse_start());

    let first = solver.solve(1).unwrap();
    assert_eq!(first.answer, "3");
    assert!(first.duration().num_nanoseconds().unwrap_or(0) >= 0);
    assert_eq!(solver.solve(2).unwrap().answer, "c");
    assert!(matches!(
        solver.solve(3),
        Err(SolveError::PartOutOfRange(3))
    ));
}

#[test]
fn missing_and_invalid_slots_are_distinguished() {
    let registry = SolverRegistryBuilder::new()
        .register::<Lines>(2023, 5)
        .unwrap()
        .build();

    assert!(matches!(
        registry.create_solver(2023, 6, "x"),
        Err(SolverError::NotFound(2023, 6))
    ));
    assert!(matches!(
        registry.create_solver(2023, 26, "x"),
        Err(SolverError::InvalidYearDay(2023, 26))
    ));
    assert!(matches!(
        registry.create_solver(1999, 1, "x"),
        Err(SolverError::InvalidYearDay(1999, 1))
    ));
}

#[test]
fn parse_failure_is_reported_as_solver_error() {
    let registry = SolverRegistryBuilder::new()
        .register::<Lines>(2023, 5)
        .unwrap()
        .build();

    match registry.create_solver(2023, 5, "  \n") {
        Err(SolverError::ParseError(ParseError::MissingData(msg))) => {
            assert_eq!(msg, "empty input")
        }
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("empty input should not parse"),
    }
}

#[test]
fn duplicate_and_out_of_range_registrations_fail() {
    let builder = SolverRegistryBuilder::new()
        .register::<Lines>(2024, 1)
        .unwrap();
    assert!(matches!(
        builder.register::<Lines>(2024, 1),
        Err(RegistrationError::DuplicateSolver(2024, 1))
    ));
    assert!(matches!(
        SolverRegistryBuilder::new().register::<Lines>(2024, 0),
        Err(RegistrationError::InvalidYearDay(2024, 0))
    ));
}

#[test]
fn storage_lists_registrations_in_year_day_order() {
    let builder = SolverRegistryBuilder::new();
    let builder = register_solver!(builder, Lines, 2024, 3).unwrap();
    let builder = register_solver!(builder, Lines, 2016, 25).unwrap();
    let builder = builder
        .register_factory(2024, 1, 1, |input: &str| {
            let instance = aoc_solver::SolverInstance::<Lines>::new(2024, 1, input)?;
            Ok(Box::new(instance) as Box<dyn DynSolver + '_>)
        })
        .unwrap();
    let registry = builder.build();
    let storage = registry.storage();

    let order: Vec<(u16, u8, u8)> = storage
        .iter_info()
        .map(|info| (info.year, info.day, info.parts))
        .collect();
    assert_eq!(order, vec![(2016, 25, 2), (2024, 1, 1), (2024, 3, 2)]);
    assert_eq!(storage.len(), 3);
    assert!(!storage.is_empty());
    assert_eq!(storage.get_info(2024, 1).map(|i| i.parts), Some(1));
    assert!(storage.get_info(2024, 2).is_none());
}

#[test]
fn empty_registry_reports_empty() {
    let registry = SolverRegistryBuilder::default().build();
    assert!(registry.storage().is_empty());
    assert_eq!(registry.storage().iter_info().count(), 0);
}
