//! Checklist and check item reducers

use crate::error::{BoardError, Result};
use crate::types::{
    Board, CheckItem, CheckItemId, CheckItemPatch, Checklist, ChecklistId, ChecklistPatch, TaskId,
};

fn checklist_mut<'a>(
    board: &'a mut Board,
    task_id: &TaskId,
    checklist_id: &ChecklistId,
) -> Result<&'a mut Checklist> {
    board
        .require_task_mut(task_id)?
        .find_checklist_mut(checklist_id)
        .ok_or_else(|| BoardError::ChecklistNotFound {
            id: checklist_id.to_string(),
        })
}

pub(super) fn add_checklist(board: &mut Board, task_id: &TaskId, checklist: Checklist) -> Result<()> {
    let task = board.require_task_mut(task_id)?;
    if task.find_checklist(&checklist.id).is_some() {
        return Err(BoardError::duplicate_id("checklist", checklist.id.to_string()));
    }
    task.checklists.push(checklist);
    Ok(())
}

pub(super) fn update_checklist(
    board: &mut Board,
    task_id: &TaskId,
    checklist_id: &ChecklistId,
    patch: &ChecklistPatch,
) -> Result<()> {
    patch.apply(checklist_mut(board, task_id, checklist_id)?);
    Ok(())
}

pub(super) fn delete_checklist(
    board: &mut Board,
    task_id: &TaskId,
    checklist_id: &ChecklistId,
) -> Result<()> {
    let task = board.require_task_mut(task_id)?;
    let index = task
        .checklists
        .iter()
        .position(|c| &c.id == checklist_id)
        .ok_or_else(|| BoardError::ChecklistNotFound {
            id: checklist_id.to_string(),
        })?;
    task.checklists.remove(index);
    Ok(())
}

pub(super) fn add_check_item(
    board: &mut Board,
    task_id: &TaskId,
    checklist_id: &ChecklistId,
    check_item: CheckItem,
) -> Result<()> {
    let checklist = checklist_mut(board, task_id, checklist_id)?;
    if checklist.find_item(&check_item.id).is_some() {
        return Err(BoardError::duplicate_id("check item", check_item.id.to_string()));
    }
    checklist.check_items.push(check_item);
    Ok(())
}

pub(super) fn update_check_item(
    board: &mut Board,
    task_id: &TaskId,
    checklist_id: &ChecklistId,
    check_item_id: &CheckItemId,
    patch: &CheckItemPatch,
) -> Result<()> {
    let item = checklist_mut(board, task_id, checklist_id)?
        .find_item_mut(check_item_id)
        .ok_or_else(|| BoardError::CheckItemNotFound {
            id: check_item_id.to_string(),
        })?;
    patch.apply(item);
    Ok(())
}

pub(super) fn delete_check_item(
    board: &mut Board,
    task_id: &TaskId,
    checklist_id: &ChecklistId,
    check_item_id: &CheckItemId,
) -> Result<()> {
    let checklist = checklist_mut(board, task_id, checklist_id)?;
    let index = checklist
        .check_items
        .iter()
        .position(|i| &i.id == check_item_id)
        .ok_or_else(|| BoardError::CheckItemNotFound {
            id: check_item_id.to_string(),
        })?;
    checklist.check_items.remove(index);
    Ok(())
}
