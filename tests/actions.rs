use homestead::{
    config::BuildingCost, Catalog, Game, GameConfig, GameError, Outcome, Rejection, TileMap,
};

fn game() -> Game {
    Game::standard().unwrap()
}

fn rich_game() -> Game {
    let mut config = GameConfig::default();
    config.starting_resources.insert("gold".into(), 1000.0);
    config.starting_resources.insert("wood".into(), 200.0);
    config.starting_resources.insert("stone".into(), 200.0);
    Game::new(Catalog::standard().unwrap(), config).unwrap()
}

fn rejected(reason: Rejection) -> Outcome {
    Outcome::Rejected(reason)
}

#[test]
fn selling_is_all_or_nothing() {
    let mut game = game();
    game.set_amount("wood", 5.0).unwrap();
    let before = game.state().clone();

    assert!(!game.can_sell("wood", 6.0).unwrap());
    assert_eq!(game.sell_resource("wood", 6.0).unwrap(), rejected(Rejection::InsufficientAmount));
    assert_eq!(game.state(), &before);

    assert_eq!(game.sell_resource("wood", 3.0).unwrap(), Outcome::Applied);
    assert_eq!(game.amount("wood").unwrap(), 2.0);
    assert_eq!(game.gold(), 53.0);
}

#[test]
fn unsellable_and_empty_sales_are_rejected() {
    let mut game = game();
    assert_eq!(game.sell_resource("gold", 1.0).unwrap(), rejected(Rejection::NotSellable));
    assert_eq!(game.sell_resource("stone", 0.0).unwrap(), rejected(Rejection::NothingToSell));
    assert_eq!(game.sell_all_resource("stone").unwrap(), rejected(Rejection::NothingToSell));
    assert_eq!(
        game.sell_resource("mithril", 1.0).unwrap_err(),
        GameError::UnknownResource("mithril".into())
    );
}

#[test]
fn percentage_sales_round_down_and_clamp() {
    let mut game = game();
    game.set_amount("wood", 7.0).unwrap();
    assert!(game.sell_resource_percentage("wood", 50.0).unwrap().is_applied());
    assert_eq!(game.amount("wood").unwrap(), 4.0);
    assert_eq!(game.gold(), 53.0);

    assert!(game.sell_resource_percentage("wood", 150.0).unwrap().is_applied());
    assert_eq!(game.amount("wood").unwrap(), 0.0);
    assert_eq!(game.gold(), 57.0);

    game.set_amount("stone", 1.0).unwrap();
    assert_eq!(
        game.sell_resource_percentage("stone", 50.0).unwrap(),
        rejected(Rejection::NothingToSell)
    );
    assert_eq!(game.amount("stone").unwrap(), 1.0);
}

#[test]
fn each_hire_costs_more_than_the_last() {
    let mut game = rich_game();
    for _ in 0..3 {
        assert!(game.hire_worker("wood").unwrap().is_applied());
    }
    let wood = game.resource("wood").unwrap();
    assert_eq!(wood.workers, 3);
    assert!((wood.worker_cost - 10.0 * 1.15_f64.powi(3)).abs() < 1e-9);
    assert!((game.gold() - (1000.0 - 10.0 - 11.5 - 13.225)).abs() < 1e-9);
}

#[test]
fn hiring_requires_gold_and_a_hireable_resource() {
    let mut game = game();
    game.set_amount("gold", 5.0).unwrap();
    let before = game.state().clone();
    assert!(!game.can_hire_worker("wood").unwrap());
    assert_eq!(game.hire_worker("wood").unwrap(), rejected(Rejection::InsufficientGold));
    assert_eq!(game.state(), &before);

    assert_eq!(game.hire_worker("brick").unwrap(), rejected(Rejection::NotHireable));
    assert!(game.hire_worker("mithril").is_err());
}

#[test]
fn gathering_preconditions() {
    let mut game = game();
    assert_eq!(game.start_gathering("brick").unwrap(), rejected(Rejection::NotGatherable));
    assert_eq!(game.start_gathering("hatchet").unwrap(), rejected(Rejection::MissingMaterials));

    assert!(game.can_start_gathering("wood").unwrap());
    assert!(game.start_gathering("wood").unwrap().is_applied());
    assert_eq!(game.start_gathering("wood").unwrap(), rejected(Rejection::AlreadyGathering));
    assert!(!game.can_start_gathering("wood").unwrap());
}

#[test]
fn equipping_consumes_one_owned_unit() {
    let mut game = game();
    assert_eq!(game.equip_tool("hatchet").unwrap(), rejected(Rejection::NotOwned));
    assert_eq!(
        game.equip_tool("wood").unwrap_err(),
        GameError::UnknownToolCategory("wood".into())
    );

    game.set_amount("hatchet", 1.0).unwrap();
    assert!(game.can_equip_tool("hatchet").unwrap());
    assert!(game.equip_tool("hatchet").unwrap().is_applied());
    assert_eq!(game.equipped_tool("cutting"), Some("hatchet"));
    assert_eq!(game.amount("hatchet").unwrap(), 0.0);
}

#[test]
fn any_positive_stock_can_be_equipped() {
    let mut game = game();
    game.set_amount("pickaxe", 0.5).unwrap();
    assert!(game.equip_tool("pickaxe").unwrap().is_applied());
    assert_eq!(game.equipped_tool("mining"), Some("pickaxe"));
    assert_eq!(game.amount("pickaxe").unwrap(), 0.0);
    assert_eq!(game.equip_tool("pickaxe").unwrap(), rejected(Rejection::NotOwned));
}

#[test]
fn equipped_tool_does_not_help_workers() {
    let mut game = game();
    game.set_amount("hatchet", 1.0).unwrap();
    assert_eq!(game.worker_bonus("wood").unwrap(), 50.0);
    game.equip_tool("hatchet").unwrap();
    assert_eq!(game.worker_bonus("wood").unwrap(), 0.0);
    assert_eq!(game.gather_bonus("wood").unwrap(), 50.0);
}

#[test]
fn equipping_over_a_tool_discards_the_old_one() {
    let mut game = game();
    game.set_amount("hatchet", 2.0).unwrap();
    game.equip_tool("hatchet").unwrap();
    game.equip_tool("hatchet").unwrap();
    assert_eq!(game.amount("hatchet").unwrap(), 0.0);
    assert_eq!(game.equipped_tool("cutting"), Some("hatchet"));
}

#[test]
fn swapping_returns_the_old_tool() {
    let mut game = game();
    game.set_amount("hatchet", 2.0).unwrap();
    game.equip_tool("hatchet").unwrap();
    assert!(game.swap_tool("hatchet").unwrap().is_applied());
    assert_eq!(game.amount("hatchet").unwrap(), 1.0);
    assert_eq!(game.equipped_tool("cutting"), Some("hatchet"));
}

#[test]
fn unequipping_returns_the_tool_to_inventory() {
    let mut game = game();
    assert_eq!(game.unequip_tool("pickaxe").unwrap(), rejected(Rejection::NotEquipped));

    game.set_amount("pickaxe", 1.0).unwrap();
    game.equip_tool("pickaxe").unwrap();
    assert!(game.unequip_tool("pickaxe").unwrap().is_applied());
    assert_eq!(game.equipped_tool("mining"), None);
    assert_eq!(game.amount("pickaxe").unwrap(), 1.0);
    assert_eq!(game.gather_bonus("stone").unwrap(), 0.0);
    assert_eq!(game.worker_bonus("stone").unwrap(), 50.0);
}

#[test]
fn building_homes_grows_the_next_cost() {
    let mut game = game();
    assert!(!game.can_build_home());
    assert_eq!(game.build_home().unwrap(), rejected(Rejection::InsufficientBuildMaterials));
    assert!(game.homes().is_empty());

    let mut game = rich_game();
    assert_eq!(
        game.home_build_cost(),
        BuildingCost { wood: 50.0, stone: 30.0, gold: 100.0 }
    );
    assert!(game.build_home().unwrap().is_applied());
    assert_eq!(game.amount("wood").unwrap(), 150.0);
    assert_eq!(game.amount("stone").unwrap(), 170.0);
    assert_eq!(game.gold(), 900.0);

    let home = &game.homes()[0];
    assert_eq!((home.id, home.level, home.population), (1, 1, 2));
    assert_eq!(home.happiness, 50.0);
    assert_eq!(
        game.home_build_cost(),
        BuildingCost { wood: 65.0, stone: 39.0, gold: 130.0 }
    );

    game.build_home().unwrap();
    assert_eq!(game.homes()[1].id, 2);
}

#[test]
fn upgrading_a_home_raises_level_population_and_happiness() {
    let mut game = rich_game();
    game.build_home().unwrap();
    assert_eq!(
        game.home_upgrade_cost(1).unwrap(),
        BuildingCost { wood: 36.0, stone: 24.0, gold: 60.0 }
    );
    assert!(game.can_upgrade_home(1).unwrap());
    assert!(game.upgrade_home(1).unwrap().is_applied());

    let home = &game.homes()[0];
    assert_eq!((home.level, home.population), (2, 4));
    assert_eq!(home.happiness, 60.0);
    assert_eq!(game.upgrade_home(9).unwrap_err(), GameError::UnknownHome(9));
}

#[test]
fn happiness_is_capped() {
    let mut config = GameConfig::default();
    config.starting_resources.insert("gold".into(), 1000.0);
    config.starting_resources.insert("wood".into(), 500.0);
    config.starting_resources.insert("stone".into(), 500.0);
    config.homes.starting_happiness = 95.0;
    let mut game = Game::new(Catalog::standard().unwrap(), config).unwrap();
    game.build_home().unwrap();
    game.upgrade_home(1).unwrap();
    assert_eq!(game.homes()[0].happiness, 100.0);
}

#[test]
fn crafting_consumes_every_ingredient_or_none() {
    let mut game = game();
    game.set_amount("stone", 4.0).unwrap();
    assert!(!game.can_craft("brick").unwrap());
    assert_eq!(game.craft("brick").unwrap(), rejected(Rejection::MissingMaterials));
    assert_eq!(game.amount("stone").unwrap(), 4.0);

    game.set_amount("wood", 1.0).unwrap();
    assert!(game.craft("brick").unwrap().is_applied());
    assert_eq!(game.amount("brick").unwrap(), 1.0);
    assert_eq!(game.amount("stone").unwrap(), 0.0);
    assert_eq!(game.amount("wood").unwrap(), 0.0);

    assert_eq!(
        game.craft("golden_crown").unwrap_err(),
        GameError::UnknownRecipe("golden_crown".into())
    );
}

#[test]
fn gathering_from_the_map_follows_the_scenery() {
    let map = TileMap::parse("ggg\nggg", "t.s\n...");
    let mut game = game().with_map(map);

    assert!(game.gather_at(0, 0).unwrap().is_applied());
    assert!(game.resource("wood").unwrap().is_gathering);
    assert!(game.gather_at(2, 0).unwrap().is_applied());
    assert!(game.resource("stone").unwrap().is_gathering);

    assert_eq!(game.gather_at(1, 0).unwrap(), rejected(Rejection::NotGatherable));
    assert_eq!(game.gather_at(7, 7).unwrap(), rejected(Rejection::NotGatherable));
    assert_eq!(game.gather_at(0, 0).unwrap(), rejected(Rejection::AlreadyGathering));
}

#[test]
fn auto_sell_threshold_is_never_negative() {
    let mut game = game();
    game.set_auto_sell_threshold("wood", -5.0).unwrap();
    assert_eq!(game.resource("wood").unwrap().auto_sell_threshold, 0.0);
    assert!(game.set_auto_sell_enabled("mithril", true).is_err());
}
