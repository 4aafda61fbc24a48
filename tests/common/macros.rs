/// Asserts that the live population count matches the expected value.
#[macro_export]
macro_rules! assert_population {
    ($world:expr, $count:expr) => {
        assert_eq!($world.agents.len(), $count, "Population count mismatch");
    };
}

/// Asserts that no agent with the given id is left in the population.
#[macro_export]
macro_rules! assert_agent_gone {
    ($world:expr, $id:expr) => {
        let exists = $world.agents.iter().any(|a| a.id == $id);
        assert!(!exists, "Agent {} should be gone but was found", $id);
    };
}

/// Asserts that the agent with the given id has energy within `tol` of `expected`.
#[macro_export]
macro_rules! assert_energy_near {
    ($world:expr, $id:expr, $expected:expr, $tol:expr) => {
        let agent = $world
            .agents
            .iter()
            .find(|a| a.id == $id)
            .expect("Agent not found in world");
        assert!(
            (agent.energy - $expected).abs() < $tol,
            "Agent {} energy {} is not within {} of {}",
            $id,
            agent.energy,
            $tol,
            $expected
        );
    };
}
