use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver, SolverExt};

/// Parsed grid rows plus a cache that part 1 fills for part 2
#[derive(Debug)]
struct Rows<'a> {
    lines: Vec<&'a str>,
    widest: Option<usize>,
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 3)]
struct Widths;

impl AocParser for Widths {
    type SharedData<'a> = Rows<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let lines: Vec<&str> = input.lines().collect();
        if lines.is_empty() {
            return Err(ParseError::MissingData("no rows".into()));
        }
        Ok(Rows {
            lines,
            widest: None,
        })
    }
}

impl PartSolver<1> for Widths {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let widest = shared.lines.iter().map(|l| l.len()).max().unwrap_or(0);
        shared.widest = Some(widest);
        Ok(widest.to_string())
    }
}

impl PartSolver<2> for Widths {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let widest = shared
            .widest
            .ok_or_else(|| SolveError::failed("part 1 has not run"))?;
        Ok((widest * shared.lines.len()).to_string())
    }
}

impl PartSolver<3> for Widths {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.lines.concat())
    }
}

#[test]
fn parts_dispatch_in_order_and_share_state() {
    let mut shared = Widths::parse("ab\nabcd\na").unwrap();
    assert_eq!(Widths::solve_part(&mut shared, 1).unwrap(), "4");
    assert_eq!(shared.widest, Some(4));
    assert_eq!(Widths::solve_part(&mut shared, 2).unwrap(), "12");
    assert_eq!(Widths::solve_part(&mut shared, 3).unwrap(), "ababcda");
}

#[test]
fn part_two_alone_reports_failure() {
    let mut shared = Widths::parse("ab").unwrap();
    let err = Widths::solve_part(&mut shared, 2).unwrap_err();
    assert!(matches!(err, SolveError::SolveFailed(_)));
    assert_eq!(err.to_string(), "Solve failed: part 1 has not run");
}

#[test]
fn parts_constant_matches_max_parts() {
    assert_eq!(<Widths as Solver>::PARTS, 3);
}

#[test]
fn unknown_part_is_not_implemented_but_checked_range_rejects_first() {
    let mut shared = Widths::parse("ab").unwrap();
    assert!(matches!(
        Widths::solve_part(&mut shared, 4),
        Err(SolveError::PartNotImplemented(4))
    ));
    assert!(matches!(
        Widths::solve_part_checked_range(&mut shared, 4),
        Err(SolveError::PartOutOfRange(4))
    ));
    assert!(matches!(
        Widths::solve_part_checked_range(&mut shared, 0),
        Err(SolveError::PartOutOfRange(0))
    ));
}

#[test]
fn parse_errors_surface_unchanged() {
    let err = Widths::parse("").unwrap_err();
    assert_eq!(err.to_string(), "Missing data: no rows");
}

/// Generic solvers keep their parameters through the derive
#[derive(AocSolver)]
#[aoc_solver(max_parts = 1)]
struct Scaled<const K: u64>;

impl<const K: u64> AocParser for Scaled<K> {
    type SharedData<'a> = u64;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .trim()
            .parse()
            .map_err(|_| ParseError::InvalidFormat(format!("not a number: {input}")))
    }
}

impl<const K: u64> PartSolver<1> for Scaled<K> {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok((*shared * K).to_string())
    }
}

#[test]
fn const_generic_solver_derives() {
    let mut shared = Scaled::<3>::parse("14\n").unwrap();
    assert_eq!(Scaled::<3>::solve_part(&mut shared, 1).unwrap(), "42");
    assert!(Scaled::<3>::parse("x").is_err());
}
