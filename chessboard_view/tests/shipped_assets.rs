use std::path::PathBuf;

use chessboard_view::{
    AssetError, BoardView, DirectorySource, ImageFormat, Panel, Piece, PieceCollections,
    PieceKind, Region, Side, TileKind, ViewError,
};

fn assets_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../assets")
}

fn view() -> BoardView {
    let mut pane: Vec<(Region, Panel)> = Vec::new();
    BoardView::new(&mut pane, 8, 8, &DirectorySource::new(assets_dir())).unwrap()
}

#[test]
fn shipped_assets_load() {
    let view = view();
    assert_eq!(view.icons().len(), 12);
    let king = view.icons().get(Side::First, PieceKind::King).unwrap();
    assert_eq!(king.image().name, "whiteKing.png");
    assert_eq!(king.image().format, ImageFormat::Png);
    assert_eq!(view.tile(TileKind::Light).image().name, "whiteTile.jpg");
    assert_eq!(view.tile(TileKind::Dark).image().format, ImageFormat::Jpeg);

    let (light, dark) = (view.tile(TileKind::Light).image(), view.tile(TileKind::Dark).image());
    assert_eq!((light.width, light.height), (16, 16));
    assert!(light.average_rgb()[0] > dark.average_rgb()[0]);
}

#[test]
fn missing_directory_is_fatal() {
    let mut pane: Vec<(Region, Panel)> = Vec::new();
    let source = DirectorySource::new(assets_dir().join("does-not-exist"));
    match BoardView::new(&mut pane, 8, 8, &source) {
        Err(ViewError::Asset(AssetError::Missing { name, .. })) => {
            assert_eq!(name, "whitePawn.png")
        }
        other => panic!("expected a missing asset, got {other:?}"),
    }
    assert!(pane.is_empty());
}

#[test]
fn pawn_is_painted_then_cleared() {
    let mut view = view();
    let mut model = PieceCollections::new();
    model.insert(7, Piece::new(Side::First, PieceKind::Pawn, 1, 0));
    view.refresh_board(&model).unwrap();

    let a2 = view.cell_at(1, 0).unwrap();
    assert_eq!(a2.name(), "A2");
    assert_eq!(
        a2.icon().map(|icon| icon.image().name.as_str()),
        Some("whitePawn.png")
    );
    let empty = view
        .grid()
        .iter()
        .filter(|cell| cell.icon().is_none())
        .count();
    assert_eq!(empty, 63);

    model.get_mut(Side::First, 7).unwrap().removed = true;
    view.refresh_board(&model).unwrap();
    assert!(view.cell_at(1, 0).unwrap().icon().is_none());
}
